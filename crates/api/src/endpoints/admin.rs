//! Admin dashboard.

use axum::{
    Router,
    extract::State,
    response::Html,
    routing::get,
};
use serde::Serialize;
use sitecms_common::AppResult;
use sitecms_core::KindCount;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

/// Create dashboard router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard_page))
        .route("/admin/api/dashboard", get(dashboard))
}

/// Dashboard figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Email of the signed-in admin.
    pub admin: String,
    /// Rows per content kind.
    pub counts: Vec<KindCount>,
    /// Unread contact submissions.
    pub unread_submissions: u64,
}

async fn load(state: &AppState, admin: String) -> AppResult<DashboardResponse> {
    Ok(DashboardResponse {
        admin,
        counts: state.site_service.counts().await?,
        unread_submissions: state.contact_service.count_unread().await?,
    })
}

/// Dashboard figures as JSON.
async fn dashboard(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<DashboardResponse>> {
    Ok(ApiResponse::ok(load(&state, session.admin.email).await?))
}

/// Dashboard page.
async fn dashboard_page(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let dashboard = load(&state, session.admin.email).await?;
    Ok(Html(render(&dashboard)))
}

fn render(dashboard: &DashboardResponse) -> String {
    let mut rows = String::new();
    for count in &dashboard.counts {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&count.label),
            count.total,
            count.active
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Dashboard</title></head>
<body>
<header>Signed in as {admin} <form method="post" action="/admin/logout"><button>Sign out</button></form></header>
<h1>Content</h1>
<table>
<tr><th>Kind</th><th>Total</th><th>Active</th></tr>
{rows}</table>
<p>Unread contact submissions: {unread}</p>
</body>
</html>
"#,
        admin = escape(&dashboard.admin),
        unread = dashboard.unread_submissions,
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_escapes_admin_email() {
        let page = render(&DashboardResponse {
            admin: "<b>@example.com".to_string(),
            counts: Vec::new(),
            unread_submissions: 3,
        });
        assert!(page.contains("&lt;b&gt;@example.com"));
        assert!(page.contains("Unread contact submissions: 3"));
    }
}
