//! The master-detail content editor.

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::content::Content;
use crate::editor::error::EditorError;
use crate::editor::gate::ConfirmGate;
use crate::editor::list::{self, ListRow};
use crate::editor::mode::EditorMode;
use crate::editor::notice::{Notice, Notices};
use crate::gateway::{ContentGateway, ObjectStore};
use crate::media::PendingImage;
use crate::schema::{ContentSchema, Form};

/// A navigation held back by the discard-changes gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Select another row by ID.
    Select(String),
    /// Start a new entity.
    CreateNew,
    /// Open a row, e.g. from a deep link.
    Open(String),
}

/// List plus detail editor for one content type.
///
/// The editor owns the cached list, the selection, the form buffer and the
/// mode. Every operation takes `&mut self` and awaits its remote calls in
/// order, so at most one write is ever in flight.
pub struct ContentEditor<C, G, S> {
    gateway: G,
    store: S,
    items: Vec<C>,
    selected: Option<String>,
    mode: EditorMode,
    buffer: Form,
    pending_image: Option<PendingImage>,
    filter: String,
    delete_gate: ConfirmGate<String>,
    discard_gate: ConfirmGate<Navigation>,
    notices: Notices,
    busy: bool,
}

impl<C, G, S> ContentEditor<C, G, S>
where
    C: Content,
    G: ContentGateway<C>,
    S: ObjectStore,
{
    /// Create an empty editor. Call [`Self::load`] to fetch the list.
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            gateway,
            store,
            items: Vec::new(),
            selected: None,
            mode: EditorMode::Idle,
            buffer: Form::new(),
            pending_image: None,
            filter: String::new(),
            delete_gate: ConfirmGate::new(),
            discard_gate: ConfirmGate::new(),
            notices: Notices::default(),
            busy: false,
        }
    }

    fn schema() -> &'static ContentSchema {
        C::schema()
    }

    // === Read side ===

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Cached rows in display order.
    #[must_use]
    pub fn items(&self) -> &[C] {
        &self.items
    }

    /// ID of the selected row.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected entity as last confirmed by the gateway.
    #[must_use]
    pub fn selected(&self) -> Option<&C> {
        let id = self.selected.as_deref()?;
        self.items.iter().find(|item| item.id() == id)
    }

    /// The form buffer.
    #[must_use]
    pub const fn buffer(&self) -> &Form {
        &self.buffer
    }

    /// One field of the form buffer.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.buffer.get(name)
    }

    /// Image attached but not yet uploaded.
    #[must_use]
    pub const fn pending_image(&self) -> Option<&PendingImage> {
        self.pending_image.as_ref()
    }

    /// What the image slot shows: the pending preview, else the stored URL.
    #[must_use]
    pub fn image_preview(&self) -> Option<&str> {
        if let Some(image) = &self.pending_image {
            return Some(&image.preview);
        }
        Self::schema()
            .image_field
            .and_then(|field| self.buffer.get(field))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }

    /// Set the sidebar search text.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Sidebar rows under the current filter.
    #[must_use]
    pub fn rows(&self) -> Vec<ListRow> {
        list::rows(
            &self.items,
            &self.filter,
            self.selected.as_deref(),
            self.mode.is_creating(),
        )
    }

    /// Notices raised so far.
    #[must_use]
    pub const fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Drain the notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Whether a save or a delete is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy || self.delete_gate.is_in_flight()
    }

    /// Whether the buffer differs from what editing started with.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        let changed = self
            .mode
            .baseline()
            .is_some_and(|baseline| baseline != &self.buffer);
        changed || (self.mode.accepts_input() && self.pending_image.is_some())
    }

    /// Delete confirmation state.
    #[must_use]
    pub const fn delete_gate(&self) -> &ConfirmGate<String> {
        &self.delete_gate
    }

    /// Discard-changes confirmation state.
    #[must_use]
    pub const fn discard_gate(&self) -> &ConfirmGate<Navigation> {
        &self.discard_gate
    }

    // === Loading and navigation ===

    /// Fetch the list and select its first row.
    pub async fn load(&mut self) -> Result<(), EditorError> {
        let schema = Self::schema();
        let items = match self.gateway.list().await {
            Ok(items) => items,
            Err(e) => {
                error!(kind = %schema.kind, error = %e, "Failed to load list");
                self.notices.push(Notice::error(format!(
                    "Failed to load {} list",
                    schema.kind.label()
                )));
                return Err(EditorError::gateway("list", e));
            }
        };

        debug!(kind = %schema.kind, count = items.len(), "Loaded list");
        self.items = items;
        let first = self.items.first().map(|item| item.id().to_string());
        self.show(first);
        Ok(())
    }

    /// Re-fetch the list, keeping the selection when it still exists.
    ///
    /// An open edit survives the refresh unless its entity is gone.
    pub async fn reload(&mut self) -> Result<(), EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }

        let schema = Self::schema();
        let items = match self.gateway.list().await {
            Ok(items) => items,
            Err(e) => {
                error!(kind = %schema.kind, error = %e, "Failed to reload list");
                self.notices.push(Notice::error(format!(
                    "Failed to load {} list",
                    schema.kind.label()
                )));
                return Err(EditorError::gateway("list", e));
            }
        };
        self.items = items;

        let exists = |id: &String, items: &[C]| items.iter().any(|item| item.id() == id);
        let first = self.items.first().map(|item| item.id().to_string());
        let kept = self.selected.clone().filter(|id| exists(id, &self.items));

        if let EditorMode::Creating { restore, .. } = &mut self.mode {
            if restore.as_ref().is_some_and(|id| !exists(id, &self.items)) {
                *restore = None;
            }
            return Ok(());
        }

        if self.mode.is_editing() {
            if kept.is_none() {
                self.notices
                    .push(Notice::error(format!("{} not found", schema.kind.title_label())));
                self.show(first);
            }
            return Ok(());
        }

        self.show(kept.or(first));
        Ok(())
    }

    /// Select a cached row.
    ///
    /// Returns `Ok(false)` when unsaved changes armed the discard gate
    /// instead of navigating.
    pub fn select(&mut self, id: &str) -> Result<bool, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if !self.items.iter().any(|item| item.id() == id) {
            return Err(EditorError::NotFound(id.to_string()));
        }
        if !self.guard_navigation(Navigation::Select(id.to_string())) {
            return Ok(false);
        }

        self.show(Some(id.to_string()));
        Ok(true)
    }

    /// Fetch one entity by id and show it.
    ///
    /// When it no longer exists remotely, any stale cached copy is dropped
    /// and the editor returns to the list.
    pub async fn open(&mut self, id: &str) -> Result<bool, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if !self.guard_navigation(Navigation::Open(id.to_string())) {
            return Ok(false);
        }

        self.fetch_and_show(id).await?;
        Ok(true)
    }

    async fn fetch_and_show(&mut self, id: &str) -> Result<(), EditorError> {
        let schema = Self::schema();
        match self.gateway.get(id).await {
            Ok(Some(row)) => {
                match self.items.iter_mut().find(|item| item.id() == id) {
                    Some(cached) => *cached = row,
                    None => list::append(&mut self.items, row),
                }
                self.show(Some(id.to_string()));
                Ok(())
            }
            Ok(None) => {
                warn!(kind = %schema.kind, id = %id, "Opened entity no longer exists");
                list::remove(&mut self.items, id);
                self.notices
                    .push(Notice::error(format!("{} not found", schema.kind.title_label())));
                self.show(None);
                Err(EditorError::NotFound(id.to_string()))
            }
            Err(e) => {
                error!(kind = %schema.kind, id = %id, error = %e, "Failed to load entity");
                self.notices
                    .push(Notice::error(format!("Failed to load {}", schema.kind.label())));
                Err(EditorError::gateway("load", e))
            }
        }
    }

    /// Arm the discard gate when leaving would lose changes.
    /// Returns whether navigation may proceed now.
    fn guard_navigation(&mut self, target: Navigation) -> bool {
        if !self.is_dirty() {
            return true;
        }
        debug!(mode = self.mode.name(), ?target, "Navigation held for discard confirmation");
        self.discard_gate.arm(target);
        self.notices
            .push(Notice::info("You have unsaved changes. Discard them?"));
        false
    }

    /// Show `id` read-only, or go idle when it is `None` or unknown.
    fn show(&mut self, id: Option<String>) {
        self.pending_image = None;
        let row = id
            .as_deref()
            .and_then(|id| self.items.iter().find(|item| item.id() == id))
            .and_then(list::to_object);

        match row {
            Some(row) => {
                self.buffer = Self::schema().form_from_row(&row);
                self.selected = id;
                self.mode = EditorMode::Viewing;
            }
            None => {
                self.buffer = Form::new();
                self.selected = None;
                self.mode = EditorMode::Idle;
            }
        }
    }

    // === Mode transitions ===

    /// Start editing the selected entity.
    pub fn start_edit(&mut self) -> Result<(), EditorError> {
        match self.mode {
            EditorMode::Viewing if self.selected.is_some() => {
                self.mode = EditorMode::Editing {
                    snapshot: self.buffer.clone(),
                };
                Ok(())
            }
            EditorMode::Editing { .. } => Ok(()),
            _ => Err(EditorError::NothingSelected),
        }
    }

    /// Leave editing or creating without saving. Does nothing elsewhere.
    pub fn cancel(&mut self) {
        if self.busy {
            return;
        }
        self.discard_gate.cancel();

        match std::mem::take(&mut self.mode) {
            EditorMode::Editing { snapshot } => {
                self.buffer = snapshot;
                self.pending_image = None;
                self.mode = EditorMode::Viewing;
            }
            EditorMode::Creating { restore, .. } => self.show(restore),
            other => self.mode = other,
        }
    }

    /// Open a draft. Returns `false` when the discard gate was armed instead.
    pub fn create_new(&mut self) -> Result<bool, EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if !self.guard_navigation(Navigation::CreateNew) {
            return Ok(false);
        }

        self.begin_create();
        Ok(true)
    }

    fn begin_create(&mut self) {
        let restore = match &self.mode {
            EditorMode::Creating { restore, .. } => restore.clone(),
            _ => self.selected.clone(),
        };
        let draft = Self::schema().defaults(self.items.len());

        self.selected = None;
        self.pending_image = None;
        self.buffer = draft.clone();
        self.mode = EditorMode::Creating {
            restore,
            pristine: draft,
        };
    }

    // === Field input ===

    /// Set a field. Ignored (returns `false`) unless editing or creating.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> bool {
        if !self.mode.accepts_input() || self.busy || Self::schema().field(name).is_none() {
            return false;
        }
        self.buffer.insert(name.to_string(), value.into());
        true
    }

    /// Normalize a field as it loses focus.
    pub fn blur_field(&mut self, name: &str) -> bool {
        if !self.mode.accepts_input() || self.busy {
            return false;
        }
        let Some(value) = self.buffer.get(name).cloned() else {
            return false;
        };
        self.buffer
            .insert(name.to_string(), Self::schema().clamp(name, value));
        true
    }

    /// Hold a file as the pending image.
    ///
    /// The persisted image URL is cleared; the file is uploaded on save.
    pub fn attach_image(
        &mut self,
        file_name: &str,
        content_type: &str,
        bytes: impl Into<Bytes>,
    ) -> Result<(), EditorError> {
        if !self.mode.accepts_input() || self.busy {
            return Err(EditorError::NotEditing);
        }
        let schema = Self::schema();
        let Some(field) = schema.image_field else {
            return Err(EditorError::InvalidImage(format!(
                "a {} has no image",
                schema.kind.label()
            )));
        };

        match PendingImage::new(file_name, content_type, bytes) {
            Ok(image) => {
                self.buffer
                    .insert(field.to_string(), Value::String(String::new()));
                self.pending_image = Some(image);
                Ok(())
            }
            Err(rejection) => {
                debug!(file = %file_name, reason = %rejection, "Image rejected");
                self.notices.push(Notice::error(rejection.to_string()));
                Err(EditorError::InvalidImage(rejection.to_string()))
            }
        }
    }

    /// Drop both the pending image and the persisted URL.
    pub fn remove_image(&mut self) -> bool {
        let Some(field) = Self::schema().image_field else {
            return false;
        };
        if !self.mode.accepts_input() || self.busy {
            return false;
        }
        self.pending_image = None;
        self.buffer
            .insert(field.to_string(), Value::String(String::new()));
        true
    }

    // === Writes ===

    /// Validate, upload the pending image, then insert or update.
    ///
    /// On any failure the mode and buffer are kept so the save can be
    /// retried.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        if !self.mode.accepts_input() {
            return Err(EditorError::NotEditing);
        }

        let schema = Self::schema();
        let patch = match schema.validate(&self.buffer) {
            Ok(patch) => patch,
            Err(errors) => {
                let mut fields: Vec<String> =
                    errors.field_errors().keys().map(ToString::to_string).collect();
                fields.sort();
                warn!(kind = %schema.kind, fields = ?fields, "Save rejected by validation");
                self.notices
                    .push(Notice::error(format!("Please check: {}", fields.join(", "))));
                return Err(EditorError::Validation(errors));
            }
        };

        self.busy = true;
        let result = self.write(patch).await;
        self.busy = false;
        result
    }

    async fn write(&mut self, mut patch: Form) -> Result<(), EditorError> {
        let schema = Self::schema();

        if let (Some(image), Some(bucket), Some(field)) =
            (&self.pending_image, schema.bucket(), schema.image_field)
        {
            match self.store.upload(bucket, image).await {
                Ok(url) => {
                    patch.insert(field.to_string(), Value::String(url));
                }
                Err(e) => {
                    error!(kind = %schema.kind, error = %e, "Image upload failed");
                    self.notices.push(Notice::error("Failed to upload image"));
                    return Err(EditorError::Upload(e));
                }
            }
        }

        // A failed write below leaves the upload in the bucket. The pending
        // image is still held, so a retry uploads it again.
        if self.mode.is_editing() {
            self.write_update(&patch).await
        } else {
            self.write_insert(&patch).await
        }
    }

    async fn write_update(&mut self, patch: &Form) -> Result<(), EditorError> {
        let schema = Self::schema();
        let id = self.selected.clone().ok_or(EditorError::NothingSelected)?;

        match self.gateway.update(&id, patch).await {
            Ok(stored) => {
                if !matches!(list::apply_patch(&mut self.items, &id, patch), Ok(true)) {
                    match self.items.iter_mut().find(|item| item.id() == id) {
                        Some(cached) => *cached = stored,
                        None => list::append(&mut self.items, stored),
                    }
                }
                info!(kind = %schema.kind, id = %id, "Saved changes");
                self.show(Some(id));
                self.notices.push(Notice::success(format!(
                    "{} updated",
                    schema.kind.title_label()
                )));
                Ok(())
            }
            Err(e) => {
                error!(kind = %schema.kind, id = %id, error = %e, "Update failed");
                self.notices.push(Notice::error("Failed to save changes"));
                Err(EditorError::gateway("update", e))
            }
        }
    }

    async fn write_insert(&mut self, patch: &Form) -> Result<(), EditorError> {
        let schema = Self::schema();

        match self.gateway.insert(patch).await {
            Ok(row) => {
                let id = row.id().to_string();
                list::append(&mut self.items, row);
                info!(kind = %schema.kind, id = %id, "Created entity");
                self.show(Some(id));
                self.notices.push(Notice::success(format!(
                    "{} created",
                    schema.kind.title_label()
                )));
                Ok(())
            }
            Err(e) => {
                error!(kind = %schema.kind, error = %e, "Insert failed");
                self.notices.push(Notice::error(format!(
                    "Failed to create {}",
                    schema.kind.label()
                )));
                Err(EditorError::gateway("insert", e))
            }
        }
    }

    // === Delete gate ===

    /// Arm the delete gate for the selected entity.
    pub fn request_delete(&mut self) -> Result<(), EditorError> {
        if self.is_busy() {
            return Err(EditorError::Busy);
        }
        let id = self.selected.clone().ok_or(EditorError::NothingSelected)?;
        self.delete_gate.arm(id);
        Ok(())
    }

    /// Delete the armed target.
    pub async fn confirm_delete(&mut self) -> Result<(), EditorError> {
        if self.busy {
            return Err(EditorError::Busy);
        }
        let Some(id) = self.delete_gate.begin() else {
            return Err(EditorError::GateClosed);
        };

        let schema = Self::schema();
        let result = self.gateway.delete(&id).await;
        self.delete_gate.finish();

        match result {
            Ok(()) => {
                list::remove(&mut self.items, &id);
                if self.selected.as_deref() == Some(id.as_str()) {
                    let next = self.items.first().map(|item| item.id().to_string());
                    self.show(next);
                }
                info!(kind = %schema.kind, id = %id, "Deleted entity");
                self.notices.push(Notice::success(format!(
                    "{} deleted",
                    schema.kind.title_label()
                )));
                Ok(())
            }
            Err(e) => {
                error!(kind = %schema.kind, id = %id, error = %e, "Delete failed");
                self.notices.push(Notice::error(format!(
                    "Failed to delete {}",
                    schema.kind.label()
                )));
                Err(EditorError::gateway("delete", e))
            }
        }
    }

    /// Disarm the delete gate without deleting.
    pub fn cancel_delete(&mut self) -> bool {
        self.delete_gate.cancel()
    }

    // === Discard gate ===

    /// Drop unsaved changes and run the held navigation.
    pub async fn confirm_discard(&mut self) -> Result<(), EditorError> {
        let Some(target) = self.discard_gate.begin() else {
            return Err(EditorError::GateClosed);
        };
        self.discard_gate.finish();
        self.pending_image = None;

        match target {
            Navigation::Select(id) => {
                self.show(Some(id));
                Ok(())
            }
            Navigation::CreateNew => {
                self.begin_create();
                Ok(())
            }
            Navigation::Open(id) => self.fetch_and_show(&id).await,
        }
    }

    /// Keep editing; the held navigation is dropped.
    pub fn cancel_discard(&mut self) -> bool {
        self.discard_gate.cancel()
    }
}
