//! `ClientIp` extractor: the address sessions and rate limits are keyed on.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{Extensions, HeaderMap};

use coinhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Address of the client that sent the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_client_ip(
            &parts.headers,
            &parts.extensions,
            state.config.server.trust_forwarded_for,
        )
        .map(ClientIp)
        .ok_or_else(|| AppError::internal("Client address unavailable").into())
    }
}

/// Work out the client address of a request.
///
/// Uses the first `X-Forwarded-For` entry when `trust_forwarded_for` is set
/// and the header parses, otherwise the peer address recorded by
/// `into_make_service_with_connect_info`.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    extensions: &Extensions,
    trust_forwarded_for: bool,
) -> Option<IpAddr> {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
