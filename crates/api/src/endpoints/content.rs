//! Admin content CRUD, one route set shared by every content kind.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;
use sitecms_common::{AppError, AppResult};
use sitecms_core::{Content, ContentGateway, ContentKind, Form};
use tracing::info;

use crate::{
    extractors::AdminUser,
    middleware::AppState,
    response::{ApiResponse, no_content},
};

/// Create content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(list_rows).post(create_row))
        .route(
            "/{kind}/{id}",
            get(get_row).patch(update_row).delete(delete_row),
        )
}

/// Resolve a URL slug to its content kind.
pub fn parse_kind(slug: &str) -> AppResult<ContentKind> {
    ContentKind::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("Content kind {slug}")))
}

/// Run `$body` against the gateway of `$kind`, bound to `$g`.
macro_rules! with_gateway {
    ($state:expr, $kind:expr, $g:ident => $body:expr) => {
        match $kind {
            ContentKind::Service => {
                let $g = &$state.gateways.services;
                $body
            }
            ContentKind::CaseStudy => {
                let $g = &$state.gateways.case_studies;
                $body
            }
            ContentKind::TeamMember => {
                let $g = &$state.gateways.team_members;
                $body
            }
            ContentKind::Testimonial => {
                let $g = &$state.gateways.testimonials;
                $body
            }
            ContentKind::WorkingProcess => {
                let $g = &$state.gateways.working_processes;
                $body
            }
        }
    };
}

fn to_json<C: Content>(row: &C) -> AppResult<Value> {
    serde_json::to_value(row).map_err(|e| AppError::Internal(e.to_string()))
}

fn to_json_rows<C: Content>(rows: &[C]) -> AppResult<Vec<Value>> {
    rows.iter().map(to_json).collect()
}

fn into_form(body: Value) -> AppResult<Form> {
    match body {
        Value::Object(form) => Ok(form),
        _ => Err(AppError::BadRequest("Expected a JSON object".to_string())),
    }
}

/// All rows of a kind, in display order.
async fn list_rows(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<ApiResponse<Vec<Value>>> {
    let kind = parse_kind(&kind)?;
    let rows = with_gateway!(state, kind, g => to_json_rows(&g.list().await?)?);
    Ok(ApiResponse::ok(rows))
}

/// Create a row.
async fn create_row(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<ApiResponse<Value>> {
    let kind = parse_kind(&kind)?;
    let form = into_form(body)?;
    let row = with_gateway!(state, kind, g => to_json(&g.insert(&form).await?)?);

    info!(kind = %kind, admin = %session.admin.email, "Content created");
    Ok(ApiResponse::created(row))
}

/// One row.
async fn get_row(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Value>> {
    let kind = parse_kind(&kind)?;
    let row = with_gateway!(state, kind, g => match g.get(&id).await? {
        Some(row) => to_json(&row)?,
        None => return Err(AppError::NotFound(format!("{} {id}", kind.title_label()))),
    });
    Ok(ApiResponse::ok(row))
}

/// Apply a partial update.
async fn update_row(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> AppResult<ApiResponse<Value>> {
    let kind = parse_kind(&kind)?;
    let patch = into_form(body)?;
    let row = with_gateway!(state, kind, g => to_json(&g.update(&id, &patch).await?)?);

    info!(kind = %kind, id = %id, admin = %session.admin.email, "Content updated");
    Ok(ApiResponse::ok(row))
}

/// Delete a row.
async fn delete_row(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    with_gateway!(state, kind, g => g.delete(&id).await?);

    info!(kind = %kind, id = %id, admin = %session.admin.email, "Content deleted");
    Ok(no_content())
}
