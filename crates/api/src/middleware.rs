//! Application state and the admin session gate.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::DatabaseConnection;
use sitecms_common::{AppError, Config, StorageService};
use sitecms_core::{AuthService, BucketStore, ContactService, ContentGateways, ObjectStore, SiteService};
use sitecms_db::repositories::{AdminRepository, ContactSubmissionRepository};
use tracing::{debug, error};

use crate::SESSION_COOKIE;
use crate::extractors::AdminSession;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Per-table content gateways.
    pub gateways: ContentGateways,
    /// Public site reads and dashboard counts.
    pub site_service: SiteService,
    /// Contact form and inbox.
    pub contact_service: ContactService,
    /// Admin login and sessions.
    pub auth_service: AuthService,
    /// Image buckets.
    pub object_store: Arc<dyn ObjectStore>,
    /// Whether the session cookie is marked `Secure`.
    pub secure_cookie: bool,
}

impl AppState {
    /// Wire every service onto one database connection and storage backend.
    #[must_use]
    pub fn new(db: &Arc<DatabaseConnection>, storage: StorageService, config: &Config) -> Self {
        let gateways = ContentGateways::from_db(db);
        Self {
            site_service: SiteService::new(gateways.clone()),
            gateways,
            contact_service: ContactService::new(ContactSubmissionRepository::new(Arc::clone(db))),
            auth_service: AuthService::new(
                AdminRepository::new(Arc::clone(db)),
                config.admin.session_ttl_hours,
            ),
            object_store: Arc::new(BucketStore::new(storage)),
            secure_cookie: config.admin.secure_cookie,
        }
    }
}

/// What the session gate does with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through.
    Pass,
    /// `303` to the login page.
    RedirectToLogin,
    /// `303` to the dashboard.
    RedirectToDashboard,
    /// `401`, for API callers.
    Unauthorized,
}

const ADMIN: &str = "/admin";
const LOGIN: &str = "/admin/login";
const ADMIN_API: &str = "/admin/api";

fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Decide what happens to a request for `path`.
#[must_use]
pub fn gate_decision(path: &str, authenticated: bool) -> GateDecision {
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    if path == LOGIN {
        return if authenticated {
            GateDecision::RedirectToDashboard
        } else {
            GateDecision::Pass
        };
    }
    if authenticated || !under(path, ADMIN) {
        return GateDecision::Pass;
    }
    if under(path, ADMIN_API) {
        GateDecision::Unauthorized
    } else {
        GateDecision::RedirectToLogin
    }
}

/// Session gate middleware.
///
/// Resolves the session cookie for every `/admin` request and stores the
/// [`AdminSession`] in the request extensions for the handlers.
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !under(&path, ADMIN) {
        return next.run(req).await;
    }

    let mut session = None;
    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        match state.auth_service.authenticate(&token).await {
            Ok(Some(admin)) => session = Some(AdminSession { admin, token }),
            Ok(None) => debug!(path = %path, "Stale admin session"),
            Err(e) => {
                error!(error = %e, "Session lookup failed");
                return e.into_response();
            }
        }
    }

    match gate_decision(&path, session.is_some()) {
        GateDecision::Pass => {
            if let Some(session) = session {
                req.extensions_mut().insert(session);
            }
            next.run(req).await
        }
        GateDecision::RedirectToLogin => Redirect::to(LOGIN).into_response(),
        GateDecision::RedirectToDashboard => Redirect::to(ADMIN).into_response(),
        GateDecision::Unauthorized => AppError::Unauthorized.into_response(),
    }
}
