//! Admin login and logout.

use axum::{
    Json, Router,
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sitecms_common::AppResult;
use sitecms_core::LoginInput;
use tracing::info;

use crate::{
    SESSION_COOKIE,
    extractors::AdminUser,
    middleware::AppState,
    response::ApiResponse,
};

/// Create auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_page).post(login))
        .route("/admin/logout", post(logout))
}

/// Who just signed in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Admin email.
    pub email: String,
    /// When the session lapses.
    pub expires_at: DateTime<Utc>,
}

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<form id="login">
  <h1>Sign in</h1>
  <label>Email <input name="email" type="email" required></label>
  <label>Password <input name="password" type="password" required></label>
  <button type="submit">Sign in</button>
  <p id="error" role="alert"></p>
</form>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const res = await fetch("/admin/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ email: form.get("email"), password: form.get("password") }),
  });
  if (res.ok) {
    window.location.assign("/admin");
  } else {
    document.getElementById("error").textContent = "Invalid email or password";
  }
});
</script>
</body>
</html>
"#;

/// Login form.
async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// Check credentials and set the session cookie.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> AppResult<(CookieJar, ApiResponse<LoginResponse>)> {
    let grant = state.auth_service.login(input).await?;

    let cookie = Cookie::build((SESSION_COOKIE, grant.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookie);

    Ok((
        jar.add(cookie),
        ApiResponse::ok(LoginResponse {
            email: grant.admin.email,
            expires_at: grant.expires_at,
        }),
    ))
}

/// End the session, clear the cookie and go back to the login page.
async fn logout(
    AdminUser(session): AdminUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    state.auth_service.logout(&session.token).await?;
    info!(admin = %session.admin.email, "Session cleared");

    Ok((
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/admin/login"),
    ))
}
