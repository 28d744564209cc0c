//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use sitecms_common::AppError;
use sitecms_db::entities::admin_user;

/// A resolved admin session, placed in the request extensions by the
/// session gate.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Signed-in admin.
    pub admin: admin_user::Model,
    /// Session cookie value.
    pub token: String,
}

/// Authenticated admin extractor.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AdminSession);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminSession>()
            .cloned()
            .map(AdminUser)
            .ok_or(AppError::Unauthorized)
    }
}
