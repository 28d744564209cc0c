//! Contact submission repository.

use std::sync::Arc;

use crate::entities::{ContactSubmission, contact_submission};
use sitecms_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Contact submission repository for database operations.
#[derive(Clone)]
pub struct ContactSubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl ContactSubmissionRepository {
    /// Create a new contact submission repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a submission by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<contact_submission::Model>> {
        ContactSubmission::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List submissions, newest first.
    pub async fn find_recent(
        &self,
        unread_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<contact_submission::Model>> {
        let mut query = ContactSubmission::find();
        if unread_only {
            query = query.filter(contact_submission::Column::IsRead.eq(false));
        }

        query
            .order_by_desc(contact_submission::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count unread submissions.
    pub async fn count_unread(&self) -> AppResult<u64> {
        ContactSubmission::find()
            .filter(contact_submission::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new submission.
    pub async fn create(
        &self,
        model: contact_submission::ActiveModel,
    ) -> AppResult<contact_submission::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the read flag of a submission.
    pub async fn set_read(
        &self,
        submission: contact_submission::Model,
        is_read: bool,
    ) -> AppResult<contact_submission::Model> {
        let mut model: contact_submission::ActiveModel = submission.into();
        model.is_read = Set(is_read);
        model.updated_at = Set(chrono::Utc::now());

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a submission. Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = ContactSubmission::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}
