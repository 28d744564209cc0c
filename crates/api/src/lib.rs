//! HTTP API layer for sitecms.
//!
//! - **Public surface**: active site content and the contact form
//! - **Admin surface**: login, the session gate, content CRUD for every
//!   content kind, the contact inbox and image uploads
//! - **Extractors**: the authenticated admin and the session cookie
//!
//! Built on Axum 0.8. The binary adds tracing, CORS and static file serving
//! on top of [`app`].

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::Router;

pub use endpoints::router;
pub use middleware::{AppState, GateDecision, gate_decision, session_gate};

/// Name of the admin session cookie.
pub const SESSION_COOKIE: &str = "sitecms_session";

/// The full router with the session gate installed and state attached.
pub fn app(state: AppState) -> Router {
    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .with_state(state)
}
