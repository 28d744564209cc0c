//! Public site content endpoints.

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;
use sitecms_common::AppResult;
use sitecms_core::SiteContent;

use crate::{endpoints::content::parse_kind, middleware::AppState, response::ApiResponse};

/// Create site router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site_content))
        .route("/{kind}", get(site_kind))
}

/// Active rows of every content kind.
async fn site_content(State(state): State<AppState>) -> AppResult<ApiResponse<SiteContent>> {
    let content = state.site_service.snapshot().await?;
    Ok(ApiResponse::ok(content))
}

/// Active rows of one content kind.
async fn site_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<ApiResponse<Vec<Value>>> {
    let kind = parse_kind(&kind)?;
    let rows = state.site_service.active(kind).await?;
    Ok(ApiResponse::ok(rows))
}
