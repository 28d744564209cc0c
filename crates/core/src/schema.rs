//! Declarative content schemas.
//!
//! Every editable content type describes its fields once, as a static
//! [`ContentSchema`]. Defaults, form snapshots, on-blur normalization and
//! validation are all derived from that description, so a single generic
//! editor and a single set of HTTP handlers serve every content type.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

/// A form buffer or write patch, keyed by column name.
pub type Form = Map<String, Value>;

/// The editable content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Services offered.
    Service,
    /// Client projects.
    CaseStudy,
    /// People on the team.
    TeamMember,
    /// Client quotes.
    Testimonial,
    /// Steps of the working process.
    WorkingProcess,
}

impl ContentKind {
    /// Every content kind, in site order.
    pub const ALL: [Self; 5] = [
        Self::Service,
        Self::CaseStudy,
        Self::TeamMember,
        Self::Testimonial,
        Self::WorkingProcess,
    ];

    /// URL segment for this kind (`/admin/api/{slug}`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Service => "services",
            Self::CaseStudy => "case-studies",
            Self::TeamMember => "team-members",
            Self::Testimonial => "testimonials",
            Self::WorkingProcess => "working-processes",
        }
    }

    /// Parse a URL segment.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Lowercase human name, used in notices ("Failed to delete team member").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::CaseStudy => "case study",
            Self::TeamMember => "team member",
            Self::Testimonial => "testimonial",
            Self::WorkingProcess => "working process",
        }
    }

    /// Label with its first letter capitalized.
    #[must_use]
    pub fn title_label(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Object storage bucket holding this kind's images, if it has any.
    #[must_use]
    pub const fn bucket(self) -> Option<&'static str> {
        match self {
            Self::Service => Some("service-icons"),
            Self::CaseStudy => Some("case-study-images"),
            Self::TeamMember => Some("team-avatars"),
            Self::Testimonial => Some("testimonial-avatars"),
            Self::WorkingProcess => None,
        }
    }

    /// All image buckets.
    pub fn buckets() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().filter_map(Self::bucket)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// How a field is edited and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    Text,
    /// Multi-line text.
    LongText,
    /// Absolute http(s) URL.
    Url,
    /// URL of an uploaded image, managed by the image sub-flow.
    Image,
    /// Whole number within bounds. Every integer column is 32-bit, so the
    /// effective bounds never leave the `i32` range.
    Integer {
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value; `None` means the column maximum.
        max: Option<i64>,
    },
    /// Flag.
    Boolean,
    /// JSON document edited as text.
    JsonText,
}

/// One editable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name.
    pub name: &'static str,
    /// Input type and rules.
    pub kind: FieldKind,
    /// Blank values are rejected on save.
    pub required: bool,
}

impl FieldSpec {
    /// A required field.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// An optional field.
    #[must_use]
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// Display position shared by every content table.
pub const SORT_ORDER: FieldSpec = FieldSpec::required(
    "sort_order",
    FieldKind::Integer { min: 0, max: None },
);

/// Publication flag shared by every content table.
pub const IS_ACTIVE: FieldSpec = FieldSpec::required("is_active", FieldKind::Boolean);

/// Static description of a content type.
#[derive(Debug)]
pub struct ContentSchema {
    /// Content type described.
    pub kind: ContentKind,
    /// Backing table.
    pub table: &'static str,
    /// Field holding the uploaded image URL.
    pub image_field: Option<&'static str>,
    /// Field shown as the list row title.
    pub title_field: &'static str,
    /// Field shown under the title.
    pub subtitle_field: Option<&'static str>,
    /// Editable fields, in form order.
    pub fields: &'static [FieldSpec],
}

impl ContentSchema {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Image bucket of this content type.
    #[must_use]
    pub const fn bucket(&self) -> Option<&'static str> {
        self.kind.bucket()
    }

    /// Fresh draft buffer placed at `sort_order`.
    #[must_use]
    pub fn defaults(&self, sort_order: usize) -> Form {
        self.fields
            .iter()
            .map(|field| {
                let value = match field.kind {
                    FieldKind::Integer { .. } if field.name == SORT_ORDER.name => {
                        Value::from(sort_order as i64)
                    }
                    FieldKind::Integer { min, .. } => Value::from(min),
                    FieldKind::Boolean => Value::Bool(false),
                    _ => Value::String(String::new()),
                };
                (field.name.to_string(), value)
            })
            .collect()
    }

    /// Form buffer holding the editable fields of a stored row.
    ///
    /// Nulls become empty strings and JSON documents are pretty-printed.
    #[must_use]
    pub fn form_from_row(&self, row: &Form) -> Form {
        self.fields
            .iter()
            .map(|field| {
                let stored = row.get(field.name).cloned().unwrap_or(Value::Null);
                let value = match (field.kind, stored) {
                    (FieldKind::JsonText, Value::Null) => Value::String(String::new()),
                    (FieldKind::JsonText, Value::String(s)) => Value::String(s),
                    (FieldKind::JsonText, doc) => Value::String(
                        serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string()),
                    ),
                    (FieldKind::Integer { min, .. }, Value::Null) => Value::from(min),
                    (FieldKind::Boolean, Value::Null) => Value::Bool(false),
                    (_, Value::Null) => Value::String(String::new()),
                    (_, other) => other,
                };
                (field.name.to_string(), value)
            })
            .collect()
    }

    /// Normalize a value as it leaves its input.
    ///
    /// Integer fields are clamped into their declared bounds. Anything else,
    /// and anything that is not a number, is returned unchanged.
    #[must_use]
    pub fn clamp(&self, name: &str, value: Value) -> Value {
        let Some(FieldSpec {
            kind: FieldKind::Integer { min, max },
            ..
        }) = self.field(name)
        else {
            return value;
        };

        match as_integer(&value) {
            Some(n) => {
                let (min, max) = integer_bounds(*min, *max);
                Value::from(n.clamp(min, max))
            }
            None => value,
        }
    }

    /// Validate a complete form buffer and produce the write patch.
    pub fn validate(&self, form: &Form) -> Result<Form, ValidationErrors> {
        self.validate_patch(form, false)
    }

    /// Validate a patch.
    ///
    /// With `partial` set only the fields present are checked; otherwise
    /// every schema field is. Keys outside the schema are dropped. The
    /// returned patch carries normalized values: trimmed text, `null` for
    /// blank optional fields, parsed JSON documents.
    pub fn validate_patch(&self, patch: &Form, partial: bool) -> Result<Form, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut normalized = Form::new();

        for field in self.fields {
            let value = match patch.get(field.name) {
                Some(value) => value,
                None if partial => continue,
                None => &Value::Null,
            };

            match normalize(field, value) {
                Ok(value) => {
                    normalized.insert(field.name.to_string(), value);
                }
                Err(error) => errors.add(field.name, error),
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

fn normalize(field: &FieldSpec, value: &Value) -> Result<Value, ValidationError> {
    match field.kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::Image => {
            normalize_text(field, value).map(|text| text.map_or(Value::Null, Value::String))
        }
        FieldKind::Url => match normalize_text(field, value)? {
            Some(text) => match url::Url::parse(&text) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                    Ok(Value::String(text))
                }
                _ => Err(error("url", format!("{} must be an http(s) URL", field.name))),
            },
            None => Ok(Value::Null),
        },
        FieldKind::Integer { min, max } => {
            if value.is_null() || value.as_str().is_some_and(|s| s.trim().is_empty()) {
                return Err(error("required", format!("{} is required", field.name)));
            }
            let n = as_integer(value)
                .ok_or_else(|| error("type", format!("{} must be a whole number", field.name)))?;
            let (lo, hi) = integer_bounds(min, max);
            if n < lo || n > hi {
                let bounds = match max {
                    Some(_) => format!("between {lo} and {hi}"),
                    None if n < lo => format!("at least {lo}"),
                    None => format!("at most {hi}"),
                };
                return Err(error("range", format!("{} must be {bounds}", field.name)));
            }
            Ok(Value::from(n))
        }
        FieldKind::Boolean => match value {
            Value::Null => Ok(Value::Bool(false)),
            Value::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(error("type", format!("{} must be true or false", field.name))),
        },
        FieldKind::JsonText => match value {
            Value::Object(_) | Value::Array(_) => Ok(value.clone()),
            _ => match normalize_text(field, value)? {
                Some(text) => serde_json::from_str(&text)
                    .map_err(|e| error("json", format!("{} is not valid JSON: {e}", field.name))),
                None => Ok(Value::Null),
            },
        },
    }
}

/// Trimmed text, or `None` when blank. Blank required fields are errors.
fn normalize_text(field: &FieldSpec, value: &Value) -> Result<Option<String>, ValidationError> {
    let text = match value {
        Value::Null => "",
        Value::String(s) => s.trim(),
        _ => return Err(error("type", format!("{} must be text", field.name))),
    };

    if text.is_empty() {
        if field.required {
            return Err(error("required", format!("{} is required", field.name)));
        }
        return Ok(None);
    }
    Ok(Some(text.to_string()))
}

/// Declared bounds narrowed to what an `i32` column can hold.
fn integer_bounds(min: i64, max: Option<i64>) -> (i64, i64) {
    let floor = i64::from(i32::MIN);
    let ceiling = i64::from(i32::MAX);
    let min = min.clamp(floor, ceiling);
    let max = max.map_or(ceiling, |max| max.clamp(min, ceiling));
    (min, max)
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}
