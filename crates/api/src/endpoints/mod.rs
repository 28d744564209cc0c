//! API endpoints.

mod admin;
mod auth;
mod contact;
mod content;
mod inbox;
mod site;
mod uploads;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::middleware::AppState;

/// Create the router for every public and admin route.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/site", site::router())
        .nest("/api/contact", contact::router())
        .merge(auth::router())
        .merge(admin::router())
        .nest("/admin/api/contact-submissions", inbox::router())
        .nest("/admin/api/uploads", uploads::router())
        .nest("/admin/api", content::router())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
