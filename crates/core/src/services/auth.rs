//! Admin authentication and sessions.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::Set;
use serde::Deserialize;
use sitecms_common::{AppError, AppResult, IdGenerator};
use sitecms_db::entities::{admin_session, admin_user};
use sitecms_db::repositories::AdminRepository;
use tracing::{info, warn};
use validator::Validate;

/// Login form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    /// Admin email, matched case-insensitively.
    #[validate(email)]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// A freshly opened session.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Value for the session cookie.
    pub token: String,
    /// When the session lapses.
    pub expires_at: DateTime<Utc>,
    /// The admin now signed in.
    pub admin: admin_user::Model,
}

/// Service for admin login, logout and session lookup.
#[derive(Clone)]
pub struct AuthService {
    admin_repo: AdminRepository,
    id_gen: IdGenerator,
    session_ttl: Duration,
}

impl AuthService {
    /// Create a new auth service issuing sessions valid for `session_ttl_hours`.
    #[must_use]
    pub fn new(admin_repo: AdminRepository, session_ttl_hours: i64) -> Self {
        Self {
            admin_repo,
            id_gen: IdGenerator::new(),
            session_ttl: Duration::hours(session_ttl_hours.max(1)),
        }
    }

    /// Check credentials and open a session.
    pub async fn login(&self, input: LoginInput) -> AppResult<SessionGrant> {
        input.validate()?;

        let Some(admin) = self.admin_repo.find_by_email(&input.email).await? else {
            warn!(email = %input.email, "Login for unknown admin");
            return Err(AppError::Unauthorized);
        };

        if !verify_password(&input.password, &admin.password_hash)? {
            warn!(admin_id = %admin.id, "Login with wrong password");
            return Err(AppError::Unauthorized);
        }

        let now = Utc::now();
        let token = self.id_gen.generate_token();
        let expires_at = now + self.session_ttl;
        self.admin_repo
            .create_session(admin_session::ActiveModel {
                id: Set(self.id_gen.generate()),
                token: Set(token.clone()),
                admin_user_id: Set(admin.id.clone()),
                created_at: Set(now),
                expires_at: Set(expires_at),
            })
            .await?;

        let admin = self.admin_repo.touch_last_login(admin).await?;
        info!(admin_id = %admin.id, "Admin logged in");

        Ok(SessionGrant {
            token,
            expires_at,
            admin,
        })
    }

    /// Resolve a session token to its admin, if the session is live.
    pub async fn authenticate(&self, token: &str) -> AppResult<Option<admin_user::Model>> {
        let Some(session) = self.admin_repo.find_live_session(token, Utc::now()).await? else {
            return Ok(None);
        };
        self.admin_repo.find_by_id(&session.admin_user_id).await
    }

    /// End a session.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.admin_repo.delete_session(token).await?;
        info!("Admin logged out");
        Ok(())
    }

    /// Drop expired sessions.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        self.admin_repo.purge_expired_sessions(Utc::now()).await
    }

    /// Create the admin account if no account with this email exists.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AppResult<bool> {
        let email = email.trim().to_lowercase();
        if self.admin_repo.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }
        if password.len() < 8 {
            return Err(AppError::Config(
                "admin password must be at least 8 characters".to_string(),
            ));
        }

        let admin = self
            .admin_repo
            .create(admin_user::ActiveModel {
                id: Set(self.id_gen.generate()),
                email: Set(email),
                password_hash: Set(hash_password(password)?),
                created_at: Set(Utc::now()),
                last_login_at: Set(None),
            })
            .await?;

        info!(admin_id = %admin.id, email = %admin.email, "Seeded admin account");
        Ok(true)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
