//! Generic repository for the ordered content tables.
//!
//! Services, case studies, team members, testimonials and working processes
//! share one shape: a string primary key, free content columns, a
//! `sort_order` hint, an `is_active` flag and timestamps. One repository
//! type covers all of them; each entity only names its ordering columns via
//! [`ContentTable`].

use std::marker::PhantomData;
use std::sync::Arc;

use sitecms_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
};

/// A table holding site content edited through the admin panel.
pub trait ContentTable: EntityTrait {
    /// The `sort_order` column.
    fn sort_order_column() -> Self::Column;

    /// The `is_active` column.
    fn is_active_column() -> Self::Column;

    /// The `created_at` column (tie-breaker for equal `sort_order`).
    fn created_at_column() -> Self::Column;
}

/// Repository for a [`ContentTable`].
pub struct ContentRepository<E> {
    db: Arc<DatabaseConnection>,
    _table: PhantomData<fn() -> E>,
}

impl<E> Clone for ContentRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            _table: PhantomData,
        }
    }
}

impl<E> ContentRepository<E>
where
    E: ContentTable,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    /// Create a new content repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _table: PhantomData,
        }
    }

    /// Find a row by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<E::Model>> {
        E::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All rows, ordered by `sort_order` then `created_at`.
    pub async fn find_all(&self) -> AppResult<Vec<E::Model>> {
        E::find()
            .order_by_asc(E::sort_order_column())
            .order_by_asc(E::created_at_column())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Rows flagged `is_active`, ordered by `sort_order` then `created_at`.
    pub async fn find_active(&self) -> AppResult<Vec<E::Model>> {
        E::find()
            .filter(E::is_active_column().eq(true))
            .order_by_asc(E::sort_order_column())
            .order_by_asc(E::created_at_column())
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all rows.
    pub async fn count(&self) -> AppResult<u64> {
        E::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a row and return it as stored.
    pub async fn create(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a row and return it as stored.
    pub async fn update(&self, model: E::ActiveModel) -> AppResult<E::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a row. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = E::delete_by_id(id.to_string())
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::{service, testimonial};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_service(id: &str, title: &str, sort_order: i32, is_active: bool) -> service::Model {
        service::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "We build things".to_string(),
            icon_url: None,
            link_url: None,
            sort_order,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_returns_row() {
        let row = create_test_service("svc1", "Web Design", 0, true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[row.clone()]])
                .into_connection(),
        );

        let repo = ContentRepository::<service::Entity>::new(db);
        let found = repo.find_by_id("svc1").await.unwrap();

        assert_eq!(found, Some(row));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<service::Model>::new()])
                .into_connection(),
        );

        let repo = ContentRepository::<service::Entity>::new(db);
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_active_orders_by_sort_order() {
        let first = create_test_service("svc1", "Strategy", 0, true);
        let second = create_test_service("svc2", "Design", 1, true);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[first, second]])
                .into_connection(),
        );

        let repo = ContentRepository::<service::Entity>::new(Arc::clone(&db));
        let rows = repo.find_active().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.is_active));

        drop(repo);
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let sql = format!("{log:?}");
        assert!(sql.contains("is_active"));
        assert!(sql.contains("ORDER BY"));
        assert!(sql.contains("sort_order"));
    }

    #[tokio::test]
    async fn test_count_returns_correct_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );

        let repo = ContentRepository::<testimonial::Entity>::new(db);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let stored = create_test_service("svc9", "SEO", 4, false);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored.clone()]])
                .into_connection(),
        );

        let repo = ContentRepository::<service::Entity>::new(db);
        let model = service::ActiveModel {
            id: Set("svc9".to_string()),
            title: Set("SEO".to_string()),
            description: Set("We build things".to_string()),
            icon_url: Set(None),
            link_url: Set(None),
            sort_order: Set(4),
            is_active: Set(false),
            created_at: Set(stored.created_at),
            updated_at: Set(stored.updated_at),
        };

        let created = repo.create(model).await.unwrap();
        assert_eq!(created.id, "svc9");
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ])
                .into_connection(),
        );

        let repo = ContentRepository::<service::Entity>::new(db);
        assert!(repo.delete("svc1").await.unwrap());
        assert!(!repo.delete("svc1").await.unwrap());
    }
}
