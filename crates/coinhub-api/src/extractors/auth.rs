//! `AuthUser` extractor: checks the `Token`/`Username` pair against the
//! session store.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use coinhub_auth::{AuthOutcome, Session};
use coinhub_core::error::AppError;

use super::client::ClientIp;
use super::headers::{TOKEN, USERNAME, required_header};
use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's username, equal to `session.owner`.
    pub username: String,
    /// The session the request presented.
    pub session: Session,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    /// Checks, in order: both headers present (400), username charset
    /// (400), user exists (404), session valid for this user and address
    /// (401). A session failing the last check is destroyed.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = required_header(&parts.headers, TOKEN)?;
        let username = required_header(&parts.headers, USERNAME)?;

        state.validator.validate_username(&username)?;

        if !state.users.exists(&username).await? {
            return Err(AppError::not_found("User not found").into());
        }

        let ClientIp(address) = ClientIp::from_request_parts(parts, state).await?;

        match state.sessions.authenticate(&token, &username, address).await {
            AuthOutcome::Authenticated(session) => Ok(AuthUser { username, session }),
            AuthOutcome::Unauthenticated(reason) => {
                tracing::debug!(username = %username, reason = %reason, "Authentication failed");
                Err(AppError::authentication(format!("Invalid session: {reason}")).into())
            }
        }
    }
}
