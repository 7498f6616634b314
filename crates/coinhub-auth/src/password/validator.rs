//! Character rules for usernames and passwords.

use coinhub_core::error::AppError;

/// Validates the character classes of submitted credentials.
///
/// Usernames are restricted to ASCII letters and digits because they are
/// echoed in paths (`/api/group/{user}`) and headers. Passwords may contain
/// anything except whitespace.
#[derive(Debug, Clone, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Rejects empty usernames and any character outside `[A-Za-z0-9]`.
    pub fn validate_username(&self, username: &str) -> Result<(), AppError> {
        if username.is_empty() {
            return Err(AppError::validation("Username must not be empty"));
        }

        if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::validation(
                "Username may only contain letters and digits",
            ));
        }

        Ok(())
    }

    /// Rejects empty passwords and passwords containing whitespace.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        if password.chars().any(char::is_whitespace) {
            return Err(AppError::validation(
                "Password must not contain whitespace",
            ));
        }

        Ok(())
    }

    /// Validates both halves of a username/password pair.
    pub fn validate_credentials(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.validate_username(username)?;
        self.validate_password(password)
    }
}
