//! Per-address admission middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use coinhub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::client::resolve_client_ip;
use crate::state::AppState;

/// Runs [`RateLimiter::admit`](coinhub_auth::RateLimiter::admit) before
/// anything else. A rejected request is answered with 429 and never
/// reaches routing, extractors, or the database.
pub async fn admit_client(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(address) = resolve_client_ip(
        request.headers(),
        request.extensions(),
        state.config.server.trust_forwarded_for,
    ) else {
        return ApiError::from(AppError::internal("Client address unavailable")).into_response();
    };

    if !state.rate_limiter.admit(address).await.is_allowed() {
        return ApiError::from(AppError::rate_limited("Too many requests")).into_response();
    }

    next.run(request).await
}
