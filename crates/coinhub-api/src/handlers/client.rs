//! Client handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use coinhub_core::error::AppError;

use crate::dto::response::{ApiResponse, MessageResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::headers::{PASSWORD, USERNAME};
use crate::extractors::{AuthUser, ClientIp, required_header};
use crate::state::AppState;

/// Read and validate the `Username`/`Password` header pair.
fn credentials(state: &AppState, headers: &HeaderMap) -> Result<(String, String), AppError> {
    let username = required_header(headers, USERNAME)?;
    let password = required_header(headers, PASSWORD)?;
    state.validator.validate_credentials(&username, &password)?;
    Ok((username, password))
}

/// POST /api/client/register
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    let (username, password) = credentials(&state, &headers)?;

    let hash = state.password_hasher.hash(password).await?;
    if !state.users.create(&username, &hash).await? {
        return Err(AppError::conflict("Username already taken").into());
    }

    tracing::info!(username = %username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MessageResponse::new("User registered"))),
    ))
}

/// POST /api/client/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(address): ClientIp,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), ApiError> {
    let (username, password) = credentials(&state, &headers)?;

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !state
        .password_hasher
        .verify(password, user.password_hash)
        .await?
    {
        tracing::warn!(username = %username, address = %address, "Login with wrong password");
        return Err(AppError::authentication("Invalid password").into());
    }

    let token = state.sessions.issue(address, &user.username).await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(TokenResponse { token })),
    ))
}

/// POST /api/client/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<MessageResponse>> {
    state.sessions.invalidate(&auth.session.token).await;
    tracing::info!(username = %auth.username, "User logged out");

    Json(ApiResponse::ok(MessageResponse::new("Logged out")))
}
