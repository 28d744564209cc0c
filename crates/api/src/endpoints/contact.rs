//! Public contact form endpoint.

use axum::{Json, Router, extract::State, routing::post};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sitecms_common::AppResult;
use sitecms_core::SubmitContactInput;

use crate::{middleware::AppState, response::ApiResponse};

/// Create contact router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

/// Acknowledgement returned to the sender.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    /// ID of the stored submission.
    pub id: String,
    /// When it was received.
    pub created_at: DateTime<Utc>,
}

/// Submit the contact form.
async fn submit(
    State(state): State<AppState>,
    Json(input): Json<SubmitContactInput>,
) -> AppResult<ApiResponse<ContactReceipt>> {
    let submission = state.contact_service.submit(input).await?;
    Ok(ApiResponse::created(ContactReceipt {
        id: submission.id,
        created_at: submission.created_at,
    }))
}
