//! Admin account and session repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crate::entities::{AdminSession, AdminUser, admin_session, admin_user};
use sitecms_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

/// Repository for admin users and their sessions.
#[derive(Clone)]
pub struct AdminRepository {
    db: Arc<DatabaseConnection>,
}

impl AdminRepository {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an admin by (lowercase) email.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<admin_user::Model>> {
        AdminUser::find()
            .filter(admin_user::Column::Email.eq(email.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an admin by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<admin_user::Model>> {
        AdminUser::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create an admin account.
    pub async fn create(&self, model: admin_user::ActiveModel) -> AppResult<admin_user::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, user: admin_user::Model) -> AppResult<admin_user::Model> {
        let mut model: admin_user::ActiveModel = user.into();
        model.last_login_at = Set(Some(Utc::now()));

        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new session.
    pub async fn create_session(
        &self,
        model: admin_session::ActiveModel,
    ) -> AppResult<admin_session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a session by token that has not expired at `now`.
    pub async fn find_live_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<admin_session::Model>> {
        AdminSession::find()
            .filter(admin_session::Column::Token.eq(token))
            .filter(admin_session::Column::ExpiresAt.gt(now))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a session by token.
    pub async fn delete_session(&self, token: &str) -> AppResult<()> {
        AdminSession::delete_many()
            .filter(admin_session::Column::Token.eq(token))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete every session that expired before `now`. Returns how many were removed.
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = AdminSession::delete_many()
            .filter(admin_session::Column::ExpiresAt.lte(now))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
