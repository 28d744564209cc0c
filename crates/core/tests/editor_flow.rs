//! End-to-end editor flows against an in-memory gateway and object store
//! that record every remote call in one shared log.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use sitecms_common::{AppError, AppResult};
use sitecms_core::editor::{EditorMode, NoticeLevel};
use sitecms_core::{
    Content, ContentEditor, ContentGateway, EditorError, Form, ObjectStore, PendingImage,
};
use sitecms_db::entities::{service, testimonial};

#[derive(Clone, Default)]
struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "list" && !c.starts_with("get"))
            .collect()
    }
}

struct MemoryGateway<C> {
    rows: Mutex<Vec<C>>,
    log: CallLog,
    next_id: AtomicUsize,
    failing: Mutex<HashSet<&'static str>>,
    stamp: DateTime<Utc>,
}

impl<C: Content> MemoryGateway<C> {
    fn new(rows: Vec<C>, log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            log,
            next_id: AtomicUsize::new(0),
            failing: Mutex::new(HashSet::new()),
            stamp: "2030-01-02T03:04:05Z".parse().unwrap(),
        })
    }

    fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    fn check(&self, op: &'static str) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(op) {
            Err(AppError::Database(format!("{op} refused")))
        } else {
            Ok(())
        }
    }

    fn remote_ids(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id().to_string())
            .collect()
    }
}

#[async_trait]
impl<C: Content> ContentGateway<C> for MemoryGateway<C> {
    async fn list(&self) -> AppResult<Vec<C>> {
        self.log.push("list");
        self.check("list")?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn list_active(&self) -> AppResult<Vec<C>> {
        self.list().await
    }

    async fn get(&self, id: &str) -> AppResult<Option<C>> {
        self.log.push(format!("get:{id}"));
        self.check("get")?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn insert(&self, patch: &Form) -> AppResult<C> {
        self.log.push("insert");
        self.check("insert")?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut row = patch.clone();
        row.insert("id".into(), json!(format!("gw-{n}")));
        row.insert("created_at".into(), json!(self.stamp.to_rfc3339()));
        row.insert("updated_at".into(), json!(self.stamp.to_rfc3339()));

        let created: C = serde_json::from_value(Value::Object(row))?;
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &Form) -> AppResult<C> {
        self.log.push(format!("update:{id}"));
        self.check("update")?;

        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        let Value::Object(mut merged) = serde_json::to_value(&*row)? else {
            unreachable!("rows serialize to objects")
        };
        merged.extend(patch.clone());
        *row = serde_json::from_value(Value::Object(merged))?;
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.log.push(format!("delete:{id}"));
        self.check("delete")?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(AppError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

struct MemoryStore {
    log: CallLog,
    fail_upload: Mutex<bool>,
}

impl MemoryStore {
    fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            fail_upload: Mutex::new(false),
        })
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, bucket: &str, image: &PendingImage) -> AppResult<String> {
        self.log.push(format!("upload:{bucket}"));
        if *self.fail_upload.lock().unwrap() {
            return Err(AppError::Storage("bucket offline".into()));
        }
        Ok(format!("/files/{bucket}/2030/01/02/{}", image.file_name))
    }

    async fn remove(&self, bucket: &str, url: &str) -> AppResult<()> {
        self.log.push(format!("remove:{bucket}:{url}"));
        Ok(())
    }
}

type Editor<C> = ContentEditor<C, Arc<MemoryGateway<C>>, Arc<MemoryStore>>;

fn svc(id: &str, title: &str, sort_order: i32) -> service::Model {
    service::Model {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{title} for growing teams"),
        icon_url: None,
        link_url: None,
        sort_order,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn service_editor(
    rows: Vec<service::Model>,
) -> (
    Editor<service::Model>,
    Arc<MemoryGateway<service::Model>>,
    Arc<MemoryStore>,
    CallLog,
) {
    let log = CallLog::default();
    let gateway = MemoryGateway::new(rows, log.clone());
    let store = MemoryStore::new(log.clone());
    let mut editor = ContentEditor::new(Arc::clone(&gateway), Arc::clone(&store));
    editor.load().await.unwrap();
    (editor, gateway, store, log)
}

async fn testimonial_editor() -> (Editor<testimonial::Model>, CallLog) {
    let log = CallLog::default();
    let gateway = MemoryGateway::new(Vec::new(), log.clone());
    let store = MemoryStore::new(log.clone());
    let mut editor = ContentEditor::new(gateway, store);
    editor.load().await.unwrap();
    (editor, log)
}

fn fill_service(editor: &mut Editor<service::Model>, title: &str) {
    assert!(editor.set_field("title", title));
    assert!(editor.set_field("description", "Strategy and delivery"));
}

fn last_notice<C: Content>(editor: &Editor<C>) -> (NoticeLevel, String) {
    let notice = editor.notices().latest().unwrap();
    (notice.level, notice.message.clone())
}

// === Mode machine ===

#[tokio::test]
async fn test_cancel_edit_restores_snapshot_and_is_idempotent() {
    let (mut editor, _, _, log) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    let original = editor.buffer().clone();

    editor.start_edit().unwrap();
    assert!(editor.set_field("title", "Changed"));
    assert!(editor.is_dirty());

    editor.cancel();
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert_eq!(editor.buffer(), &original);

    let snapshot = |e: &Editor<service::Model>| {
        (
            e.mode().clone(),
            e.buffer().clone(),
            e.selected_id().map(str::to_string),
        )
    };
    let after_first = snapshot(&editor);
    editor.cancel();
    let after_second = snapshot(&editor);
    assert_eq!(after_first, after_second);

    assert_eq!(log.writes(), Vec::<String>::new());
}

#[tokio::test]
async fn test_cancel_create_restores_previous_selection() {
    let (mut editor, _, _, log) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.select("b").unwrap();

    assert!(editor.create_new().unwrap());
    assert!(editor.selected_id().is_none());
    assert_eq!(editor.field("sort_order"), Some(&json!(2)));
    assert_eq!(editor.field("is_active"), Some(&json!(false)));
    assert!(editor.field("id").is_none());
    assert!(editor.rows()[0].is_placeholder());

    editor.cancel();
    assert_eq!(editor.selected_id(), Some("b"));
    assert_eq!(editor.mode(), &EditorMode::Viewing);

    editor.cancel();
    assert_eq!(editor.selected_id(), Some("b"));
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert!(log.writes().is_empty());
}

#[tokio::test]
async fn test_mutations_ignored_outside_edit_modes() {
    // Idle
    let (mut editor, _, _, log) = service_editor(Vec::new()).await;
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert!(!editor.set_field("title", "x"));
    assert!(!editor.blur_field("sort_order"));
    assert!(!editor.remove_image());
    assert!(matches!(
        editor.attach_image("a.png", "image/png", vec![1u8]),
        Err(EditorError::NotEditing)
    ));
    assert!(editor.buffer().is_empty());

    // Viewing
    let (mut editor, _, _, _) = service_editor(vec![svc("a", "Web Design", 0)]).await;
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    let before = editor.buffer().clone();
    assert!(!editor.set_field("title", "x"));
    assert!(!editor.blur_field("sort_order"));
    assert_eq!(editor.buffer(), &before);
    assert!(matches!(editor.save().await, Err(EditorError::NotEditing)));

    assert!(log.writes().is_empty());
}

// === Writes ===

#[tokio::test]
async fn test_create_appends_gateway_row() {
    let (mut editor, gateway, _, log) = service_editor(vec![svc("a", "Web Design", 0)]).await;

    editor.create_new().unwrap();
    fill_service(&mut editor, "Branding");
    editor.save().await.unwrap();

    let created = editor.items().last().unwrap();
    assert_eq!(created.id, "gw-1");
    assert_eq!(created.created_at, gateway.stamp);
    assert_eq!(created.sort_order, 1);
    assert!(!created.is_active);

    assert_eq!(editor.selected_id(), Some("gw-1"));
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert_eq!(log.writes(), vec!["insert"]);
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Success, "Service created".to_string())
    );
}

#[tokio::test]
async fn test_update_patches_row_in_place() {
    let (mut editor, _, _, log) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.select("b").unwrap();
    let stamped = editor.selected().unwrap().updated_at;

    editor.start_edit().unwrap();
    assert!(editor.set_field("title", "Search Engine Optimization"));
    editor.save().await.unwrap();

    let row = editor.selected().unwrap();
    assert_eq!(row.title, "Search Engine Optimization");
    assert!(row.updated_at >= stamped);
    assert_eq!(editor.items().len(), 2);
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert_eq!(log.calls(), vec!["list", "update:b"]);
}

#[tokio::test]
async fn test_failed_update_keeps_editing() {
    let (mut editor, gateway, _, _) = service_editor(vec![svc("a", "Web Design", 0)]).await;
    gateway.fail("update");

    editor.start_edit().unwrap();
    editor.set_field("title", "Redesign");
    assert!(matches!(
        editor.save().await,
        Err(EditorError::Gateway { action: "update", .. })
    ));

    assert!(editor.mode().is_editing());
    assert_eq!(editor.field("title"), Some(&json!("Redesign")));
    assert_eq!(editor.items()[0].title, "Web Design");
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Error, "Failed to save changes".to_string())
    );
    assert!(!editor.is_busy());
}

#[tokio::test]
async fn test_required_fields_block_save_without_remote_calls() {
    let (mut editor, _, _, log) = service_editor(Vec::new()).await;
    editor.create_new().unwrap();
    editor.set_field("title", "   ");
    editor.set_field("description", "Has a description");

    let err = editor.save().await.unwrap_err();
    let EditorError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.field_errors().contains_key("title"));

    assert!(editor.mode().is_creating());
    assert_eq!(log.calls(), vec!["list"]);
    assert_eq!(last_notice(&editor).0, NoticeLevel::Error);
}

// === Delete gate ===

#[tokio::test]
async fn test_delete_reselects_first_remaining_row() {
    let (mut editor, gateway, _, log) = service_editor(vec![
        svc("a", "Web Design", 0),
        svc("b", "SEO", 1),
        svc("c", "Branding", 2),
    ])
    .await;
    editor.select("b").unwrap();

    editor.request_delete().unwrap();
    assert!(editor.delete_gate().is_armed());
    editor.confirm_delete().await.unwrap();

    assert_eq!(editor.selected_id(), Some("a"));
    assert_eq!(editor.items().len(), 2);
    assert_eq!(gateway.remote_ids(), vec!["a", "c"]);

    for id in ["a", "c"] {
        editor.select(id).unwrap();
        editor.request_delete().unwrap();
        editor.confirm_delete().await.unwrap();
    }
    assert_eq!(editor.selected_id(), None);
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert_eq!(log.writes(), vec!["delete:b", "delete:a", "delete:c"]);
}

#[tokio::test]
async fn test_cancelled_delete_makes_no_call() {
    let (mut editor, _, _, log) = service_editor(vec![svc("a", "Web Design", 0)]).await;

    editor.request_delete().unwrap();
    assert!(editor.cancel_delete());
    assert!(matches!(
        editor.confirm_delete().await,
        Err(EditorError::GateClosed)
    ));
    assert!(log.writes().is_empty());
    assert_eq!(editor.items().len(), 1);
}

#[tokio::test]
async fn test_failed_delete_leaves_list_untouched() {
    let (mut editor, gateway, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    gateway.fail("delete");

    editor.request_delete().unwrap();
    assert!(editor.confirm_delete().await.is_err());

    assert_eq!(editor.items().len(), 2);
    assert_eq!(editor.selected_id(), Some("a"));
    assert!(!editor.delete_gate().is_armed());
    assert!(!editor.delete_gate().is_in_flight());
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Error, "Failed to delete service".to_string())
    );
}

#[tokio::test]
async fn test_delete_requires_selection() {
    let (mut editor, _, _, _) = service_editor(vec![svc("a", "Web Design", 0)]).await;
    editor.create_new().unwrap();
    assert!(matches!(
        editor.request_delete(),
        Err(EditorError::NothingSelected)
    ));
}

// === Images ===

#[tokio::test]
async fn test_upload_happens_before_insert() {
    let (mut editor, _, _, log) = service_editor(Vec::new()).await;
    editor.create_new().unwrap();
    fill_service(&mut editor, "Web Design");
    editor
        .attach_image("icon.png", "image/png", vec![0u8; 64])
        .unwrap();
    assert!(editor.image_preview().unwrap().starts_with("preview:"));

    editor.save().await.unwrap();

    assert_eq!(log.writes(), vec!["upload:service-icons", "insert"]);
    assert_eq!(
        editor.items()[0].icon_url.as_deref(),
        Some("/files/service-icons/2030/01/02/icon.png")
    );
    assert!(editor.pending_image().is_none());
}

#[tokio::test]
async fn test_upload_failure_prevents_write() {
    let (mut editor, _, store, log) = service_editor(vec![svc("a", "Web Design", 0)]).await;
    *store.fail_upload.lock().unwrap() = true;

    editor.start_edit().unwrap();
    editor
        .attach_image("icon.png", "image/png", vec![0u8; 64])
        .unwrap();
    assert!(matches!(editor.save().await, Err(EditorError::Upload(_))));

    assert_eq!(log.writes(), vec!["upload:service-icons"]);
    assert!(editor.mode().is_editing());
    assert!(editor.pending_image().is_some());
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Error, "Failed to upload image".to_string())
    );
}

#[tokio::test]
async fn test_failed_insert_keeps_upload_and_form() {
    let (mut editor, gateway, _, log) = service_editor(Vec::new()).await;
    gateway.fail("insert");

    editor.create_new().unwrap();
    fill_service(&mut editor, "Web Design");
    editor
        .attach_image("icon.png", "image/png", vec![0u8; 64])
        .unwrap();
    assert!(editor.save().await.is_err());

    assert_eq!(log.writes(), vec!["upload:service-icons", "insert"]);
    assert!(editor.items().is_empty());
    assert!(editor.mode().is_creating());
    assert!(editor.pending_image().is_some());
    assert_eq!(
        editor.field("title").and_then(|v| v.as_str()),
        Some("Web Design")
    );
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Error, "Failed to create service".to_string())
    );
}

#[tokio::test]
async fn test_image_rules() {
    let (mut editor, _, _, _) = service_editor(vec![svc("a", "Web Design", 0)]).await;
    editor.start_edit().unwrap();

    assert!(matches!(
        editor.attach_image("doc.pdf", "application/pdf", vec![1u8]),
        Err(EditorError::InvalidImage(_))
    ));
    assert!(matches!(
        editor.attach_image("big.png", "image/png", vec![0u8; 5 * 1024 * 1024 + 1]),
        Err(EditorError::InvalidImage(_))
    ));
    assert!(editor.pending_image().is_none());

    editor.set_field("icon_url", "/files/service-icons/old.png");
    editor
        .attach_image("new.png", "image/png", vec![0u8; 5 * 1024 * 1024])
        .unwrap();
    assert_eq!(editor.field("icon_url"), Some(&json!("")));

    assert!(editor.remove_image());
    assert!(editor.pending_image().is_none());
    assert!(editor.image_preview().is_none());
}

// === Discard gate and navigation ===

#[tokio::test]
async fn test_dirty_navigation_goes_through_discard_gate() {
    let (mut editor, _, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.start_edit().unwrap();
    editor.set_field("title", "Unsaved");

    assert!(!editor.select("b").unwrap());
    assert!(editor.discard_gate().is_armed());
    assert_eq!(editor.selected_id(), Some("a"));

    assert!(editor.cancel_discard());
    assert!(editor.mode().is_editing());
    assert_eq!(editor.field("title"), Some(&json!("Unsaved")));

    assert!(!editor.select("b").unwrap());
    editor.confirm_discard().await.unwrap();
    assert_eq!(editor.selected_id(), Some("b"));
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert_eq!(editor.items()[0].title, "Web Design");
}

#[tokio::test]
async fn test_clean_edit_navigates_immediately() {
    let (mut editor, _, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.start_edit().unwrap();

    assert!(editor.select("b").unwrap());
    assert_eq!(editor.mode(), &EditorMode::Viewing);
    assert!(!editor.discard_gate().is_armed());
}

#[tokio::test]
async fn test_open_missing_entity_returns_to_list() {
    let (mut editor, gateway, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    gateway.rows.lock().unwrap().retain(|r| r.id != "b");

    assert!(matches!(
        editor.open("b").await,
        Err(EditorError::NotFound(_))
    ));
    assert_eq!(editor.mode(), &EditorMode::Idle);
    assert!(editor.items().iter().all(|r| r.id != "b"));
    assert_eq!(
        last_notice(&editor),
        (NoticeLevel::Error, "Service not found".to_string())
    );

    assert!(editor.open("a").await.unwrap());
    assert_eq!(editor.selected_id(), Some("a"));
}

#[tokio::test]
async fn test_reload_keeps_selection() {
    let (mut editor, gateway, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.select("b").unwrap();
    gateway.rows.lock().unwrap().push(svc("c", "Branding", 2));

    editor.reload().await.unwrap();
    assert_eq!(editor.items().len(), 3);
    assert_eq!(editor.selected_id(), Some("b"));

    gateway.rows.lock().unwrap().retain(|r| r.id != "b");
    editor.reload().await.unwrap();
    assert_eq!(editor.selected_id(), Some("a"));
}

#[tokio::test]
async fn test_filter_rows() {
    let (mut editor, _, _, _) =
        service_editor(vec![svc("a", "Web Design", 0), svc("b", "SEO", 1)]).await;
    editor.set_filter("seo");
    let rows = editor.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "SEO");
}

// === Content scenarios ===

#[tokio::test]
async fn test_testimonial_scenario() {
    let (mut editor, log) = testimonial_editor().await;

    editor.create_new().unwrap();
    editor.set_field("name", "Ada");
    editor.set_field("role_company", "Engineer");
    editor.set_field("message", "Great!");

    for rating in [0, 6] {
        editor.set_field("rating", rating);
        let err = editor.save().await.unwrap_err();
        let EditorError::Validation(errors) = err else {
            panic!("rating {rating} should fail validation");
        };
        assert!(errors.field_errors().contains_key("rating"));
    }
    assert_eq!(log.calls(), vec!["list"]);

    // Blur clamps out-of-range input.
    editor.set_field("rating", 9);
    assert!(editor.blur_field("rating"));
    assert_eq!(editor.field("rating"), Some(&json!(5)));

    editor.save().await.unwrap();
    let saved = &editor.items()[0];
    assert_eq!(saved.name, "Ada");
    assert_eq!(saved.role_company, "Engineer");
    assert_eq!(saved.message, "Great!");
    assert_eq!(saved.rating, 5);
    assert_eq!(log.writes(), vec!["insert"]);
}

#[tokio::test]
async fn test_service_sort_order_scenario() {
    let (mut editor, _, _, log) = service_editor(Vec::new()).await;
    editor.create_new().unwrap();
    fill_service(&mut editor, "Web Design");

    editor.set_field("sort_order", -1);
    assert!(matches!(
        editor.save().await,
        Err(EditorError::Validation(_))
    ));
    assert!(log.writes().is_empty());

    editor.set_field("sort_order", 0);
    editor.save().await.unwrap();
    assert_eq!(editor.items()[0].sort_order, 0);
    assert_eq!(log.writes(), vec!["insert"]);
}
