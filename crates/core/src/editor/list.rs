//! Sidebar list and the local list synchronizer.
//!
//! After a successful remote write the cached list is patched in place
//! instead of being re-fetched. A failed write never reaches these
//! functions, so the list only ever reflects confirmed changes.

use chrono::Utc;
use serde_json::Value;

use crate::content::Content;
use crate::schema::Form;

/// One row of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    /// `None` for the placeholder shown while a draft is open.
    pub id: Option<String>,
    /// Display title.
    pub title: String,
    /// Secondary line, if the kind has one.
    pub subtitle: Option<String>,
    /// Image URL.
    pub thumbnail: Option<String>,
    /// Published on the site.
    pub is_active: bool,
    /// Highlighted as the current selection.
    pub selected: bool,
}

impl ListRow {
    /// Whether this is the draft placeholder.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

/// Build the sidebar rows.
///
/// `filter` matches title, subtitle and description case-insensitively.
/// While `creating`, a selected placeholder row for the draft leads the
/// list regardless of the filter.
pub fn rows<C: Content>(
    items: &[C],
    filter: &str,
    selected: Option<&str>,
    creating: bool,
) -> Vec<ListRow> {
    let schema = C::schema();
    let needle = filter.trim().to_lowercase();

    let mut out = Vec::with_capacity(items.len() + 1);
    if creating {
        out.push(ListRow {
            id: None,
            title: format!("New {}", schema.kind.label()),
            subtitle: None,
            thumbnail: None,
            is_active: false,
            selected: true,
        });
    }

    for item in items {
        let Some(row) = to_object(item) else { continue };
        let title = text(&row, schema.title_field).unwrap_or_default();
        let subtitle = schema.subtitle_field.and_then(|f| text(&row, f));
        let description = text(&row, "description");

        if !needle.is_empty() {
            let matches = [Some(&title), subtitle.as_ref(), description.as_ref()]
                .into_iter()
                .flatten()
                .any(|s| s.to_lowercase().contains(&needle));
            if !matches {
                continue;
            }
        }

        out.push(ListRow {
            id: Some(item.id().to_string()),
            title,
            subtitle,
            thumbnail: schema.image_field.and_then(|f| text(&row, f)),
            is_active: row.get("is_active").and_then(Value::as_bool).unwrap_or(false),
            selected: !creating && selected == Some(item.id()),
        });
    }

    out
}

/// Insert path: append the row the gateway returned.
pub fn append<C: Content>(items: &mut Vec<C>, row: C) {
    items.push(row);
}

/// Update path: merge a saved patch into the matching row and stamp
/// `updated_at`. Returns `Ok(false)` when no row has that id.
pub fn apply_patch<C: Content>(
    items: &mut [C],
    id: &str,
    patch: &Form,
) -> Result<bool, serde_json::Error> {
    let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
        return Ok(false);
    };

    let mut row = match serde_json::to_value(&*item)? {
        Value::Object(row) => row,
        _ => return Ok(false),
    };
    row.extend(patch.clone());
    row.insert(
        "updated_at".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );

    *item = serde_json::from_value(Value::Object(row))?;
    Ok(true)
}

/// Delete path: drop the row. Returns whether it was present.
pub fn remove<C: Content>(items: &mut Vec<C>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// A row as a JSON object.
pub fn to_object<C: Content>(item: &C) -> Option<Form> {
    match serde_json::to_value(item) {
        Ok(Value::Object(row)) => Some(row),
        _ => None,
    }
}

fn text(row: &Form, field: &str) -> Option<String> {
    row.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
