//! Admin image upload endpoints.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::{Deserialize, Serialize};
use sitecms_common::{AppError, AppResult};
use sitecms_core::{MAX_IMAGE_BYTES, ObjectStore, PendingImage, ensure_bucket};
use tracing::info;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Headroom for the multipart framing around the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create uploads router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{bucket}", post(upload_image).delete(remove_image))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD))
}

/// Where an uploaded image ended up.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL of the stored file.
    pub url: String,
}

/// Image removal request.
#[derive(Debug, Deserialize)]
pub struct RemoveImageRequest {
    /// Public URL previously returned by an upload.
    pub url: String,
}

fn multipart_error(e: &MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

/// Upload an image via multipart form field `file`.
async fn upload_image(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<UploadResponse>> {
    ensure_bucket(&bucket)?;

    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
        image = Some(PendingImage::new(file_name, content_type, bytes)?);
    }

    let image = image.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let url = state.object_store.upload(&bucket, &image).await?;

    info!(bucket = %bucket, size = image.size(), "Image uploaded");
    Ok(ApiResponse::created(UploadResponse { url }))
}

/// Remove a previously uploaded image.
async fn remove_image(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Json(req): Json<RemoveImageRequest>,
) -> AppResult<impl IntoResponse> {
    ensure_bucket(&bucket)?;
    state.object_store.remove(&bucket, &req.url).await?;
    Ok(no_content())
}
