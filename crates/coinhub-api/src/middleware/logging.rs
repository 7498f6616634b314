//! Per-request access log.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Logs method, path, status, and latency of every request.
///
/// Server errors are logged at warn, rate-limited and other client errors
/// at info, everything else at debug.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if response.status().is_server_error() {
        tracing::warn!(%method, %path, status, elapsed_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::info!(%method, %path, status, elapsed_ms, "Request rejected");
    } else {
        tracing::debug!(%method, %path, status, elapsed_ms, "Request served");
    }

    response
}
