//! Registered user account.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered user, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique ASCII-alphanumeric username.
    pub username: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}
