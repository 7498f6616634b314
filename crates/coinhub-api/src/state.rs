//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use coinhub_auth::{CredentialValidator, PasswordHasher, RateLimiter, SessionStore};
use coinhub_core::config::AppConfig;
use coinhub_database::repositories::{GroupRepository, UserRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── In-memory request-path state ─────────────────────────
    /// Session tokens, one per user
    pub sessions: Arc<SessionStore>,
    /// Per-address admission control
    pub rate_limiter: Arc<RateLimiter>,

    // ── Auth ─────────────────────────────────────────────────
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Username and password character rules
    pub validator: Arc<CredentialValidator>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub users: Arc<UserRepository>,
    /// Group repository
    pub groups: Arc<GroupRepository>,
}

impl AppState {
    /// Build the state with fresh, empty stores.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(&config.session)),
            rate_limiter: Arc::new(RateLimiter::new(&config.rate_limit)),
            password_hasher: Arc::new(PasswordHasher::new()),
            validator: Arc::new(CredentialValidator::new()),
            users: Arc::new(UserRepository::new(pool.clone())),
            groups: Arc::new(GroupRepository::new(pool)),
            config: Arc::new(config),
        }
    }
}
