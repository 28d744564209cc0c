//! Admin contact inbox endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use sitecms_common::AppResult;
use sitecms_db::entities::contact_submission;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Create inbox router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions))
        .route("/{id}", patch(mark_submission).delete(delete_submission))
}

/// List submissions query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubmissionsQuery {
    /// Only unread submissions.
    #[serde(default)]
    pub unread_only: bool,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Rows to skip.
    #[serde(default)]
    pub offset: u64,
}

const fn default_limit() -> u64 {
    50
}

/// Inbox page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    /// Newest first.
    pub submissions: Vec<contact_submission::Model>,
    /// Unread submissions in total.
    pub unread: u64,
}

/// Read flag update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    /// New read flag.
    pub is_read: bool,
}

/// List submissions, newest first.
async fn list_submissions(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<ApiResponse<InboxResponse>> {
    let submissions = state
        .contact_service
        .list(query.unread_only, query.limit, query.offset)
        .await?;
    let unread = state.contact_service.count_unread().await?;

    Ok(ApiResponse::ok(InboxResponse {
        submissions,
        unread,
    }))
}

/// Mark a submission read or unread.
async fn mark_submission(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<MarkReadRequest>,
) -> AppResult<ApiResponse<contact_submission::Model>> {
    let submission = state.contact_service.mark_read(&id, req.is_read).await?;
    Ok(ApiResponse::ok(submission))
}

/// Delete a submission.
async fn delete_submission(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.contact_service.delete(&id).await?;
    Ok(no_content())
}
