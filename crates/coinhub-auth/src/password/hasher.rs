//! Argon2id password hashing.
//!
//! Argon2 is deliberately slow, so both operations run on Tokio's blocking
//! pool instead of the request task.

use argon2::password_hash::{self, PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};
use tokio::task;

use coinhub_core::error::AppError;
use coinhub_core::result::AppResult;

/// Hashes and checks passwords as PHC strings (`$argon2id$...`).
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes `password` with a fresh random salt.
    pub async fn hash(&self, password: String) -> AppResult<String> {
        task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    /// Checks `password` against a stored PHC string.
    ///
    /// A wrong password is `Ok(false)`; only a malformed hash is an error.
    pub async fn verify(&self, password: String, phc: String) -> AppResult<bool> {
        task::spawn_blocking(move || verify_blocking(&password, &phc))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
    }
}

fn hash_blocking(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

fn verify_blocking(password: &str, phc: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| AppError::internal(format!("Stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::internal(format!("Password verification failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("correct-horse".into()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct-horse".into(), hash.clone()).await.unwrap());
        assert!(!hasher.verify("battery-staple".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash("same".into()).await.unwrap();
        let b = hasher.hash("same".into()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("pw".into(), "not-a-phc-string".into()).await.is_err());
    }
}
