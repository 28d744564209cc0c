//! Database-backed content gateway.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, IntoActiveModel, PrimaryKeyTrait};
use serde_json::Value;
use sitecms_common::{AppError, AppResult, IdGenerator};
use sitecms_db::repositories::{ContentRepository, ContentTable};
use tracing::{info, warn};

use crate::content::Content;
use crate::gateway::ContentGateway;
use crate::schema::Form;

/// [`ContentGateway`] over one content table.
///
/// Writes are re-validated against the content schema here, so rows are
/// checked the same way whether they come from the editor or from HTTP.
pub struct ContentService<E> {
    repo: ContentRepository<E>,
    id_gen: IdGenerator,
}

impl<E> Clone for ContentService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            id_gen: self.id_gen.clone(),
        }
    }
}

impl<E> ContentService<E> {
    /// Create a new content service.
    #[must_use]
    pub const fn new(repo: ContentRepository<E>) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
        }
    }
}

impl<E> ContentService<E>
where
    E: ContentTable,
    E::Model: Content + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    /// Count all rows.
    pub async fn count(&self) -> AppResult<u64> {
        self.repo.count().await
    }

    fn to_model(row: Form) -> AppResult<E::ActiveModel> {
        let model: E::Model = serde_json::from_value(Value::Object(row))
            .map_err(|e| AppError::Internal(format!("Failed to build row: {e}")))?;
        Ok(model.into_active_model().reset_all())
    }
}

#[async_trait]
impl<E> ContentGateway<E::Model> for ContentService<E>
where
    E: ContentTable,
    E::Model: Content + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    async fn list(&self) -> AppResult<Vec<E::Model>> {
        self.repo.find_all().await
    }

    async fn list_active(&self) -> AppResult<Vec<E::Model>> {
        self.repo.find_active().await
    }

    async fn get(&self, id: &str) -> AppResult<Option<E::Model>> {
        self.repo.find_by_id(id).await
    }

    async fn insert(&self, patch: &Form) -> AppResult<E::Model> {
        let schema = E::Model::schema();
        let mut row = schema.validate_patch(patch, false)?;

        let id = self.id_gen.generate();
        let now = Value::String(Utc::now().to_rfc3339());
        row.insert("id".to_string(), Value::String(id.clone()));
        row.insert("created_at".to_string(), now.clone());
        row.insert("updated_at".to_string(), now);

        let created = self.repo.create(Self::to_model(row)?).await?;
        info!(table = schema.table, id = %id, "Content row created");
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &Form) -> AppResult<E::Model> {
        let schema = E::Model::schema();
        let changes = schema.validate_patch(patch, true)?;

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {id}", schema.kind.title_label())))?;

        let mut row = match serde_json::to_value(&existing) {
            Ok(Value::Object(row)) => row,
            _ => return Err(AppError::Internal("Row did not serialize to an object".into())),
        };
        row.extend(changes);
        row.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let updated = self.repo.update(Self::to_model(row)?).await?;
        info!(table = schema.table, id = %id, "Content row updated");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let schema = E::Model::schema();
        if !self.repo.delete(id).await? {
            warn!(table = schema.table, id = %id, "Delete of missing content row");
            return Err(AppError::NotFound(format!(
                "{} {id}",
                schema.kind.title_label()
            )));
        }

        info!(table = schema.table, id = %id, "Content row deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;
    use sitecms_db::entities::{service, testimonial};
    use std::sync::Arc;

    fn create_test_service(id: &str) -> service::Model {
        service::Model {
            id: id.to_string(),
            title: "Web Design".to_string(),
            description: "Sites that convert".to_string(),
            icon_url: None,
            link_url: None,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn form(value: Value) -> Form {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let stored = create_test_service("01hzzzzzzzzzzzzzzzzzzzzzzz");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored.clone()]])
                .into_connection(),
        );

        let service = ContentService::new(ContentRepository::<service::Entity>::new(db));
        let created = service
            .insert(&form(json!({
                "title": "Web Design",
                "description": "Sites that convert",
                "sort_order": 0,
                "is_active": true
            })))
            .await
            .unwrap();

        assert_eq!(created.id, stored.id);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_patch_without_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ContentService::new(ContentRepository::<testimonial::Entity>::new(db));

        let result = service
            .insert(&form(json!({
                "name": "Ada",
                "role_company": "Engineer",
                "message": "Great!",
                "rating": 6,
                "sort_order": 0,
                "is_active": true
            })))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_sort_order_beyond_column() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = ContentService::new(ContentRepository::<service::Entity>::new(db));

        let result = service
            .insert(&form(json!({
                "title": "Web Design",
                "description": "Sites that convert",
                "sort_order": 3_000_000_000_i64,
                "is_active": true
            })))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let existing = create_test_service("svc1");
        let mut updated = existing.clone();
        updated.title = "Branding".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing], [updated]])
                .into_connection(),
        );

        let service = ContentService::new(ContentRepository::<service::Entity>::new(db));
        let result = service
            .update("svc1", &form(json!({"title": "Branding"})))
            .await
            .unwrap();

        assert_eq!(result.title, "Branding");
        assert_eq!(result.description, "Sites that convert");
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<service::Model>::new()])
                .into_connection(),
        );

        let service = ContentService::new(ContentRepository::<service::Entity>::new(db));
        let result = service.update("gone", &form(json!({"title": "X"}))).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let service = ContentService::new(ContentRepository::<service::Entity>::new(db));
        assert!(matches!(
            service.delete("gone").await,
            Err(AppError::NotFound(_))
        ));
    }
}
