//! Route definitions for the CoinHub HTTP API.
//!
//! All routes are mounted under `/api`. The rate limiter wraps every route,
//! so it runs before routing, extractors, and handlers.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(client_routes())
        .merge(group_routes())
        .merge(health_routes());

    let mut router = Router::new().nest("/api", api_routes);

    if state.config.rate_limit.enabled {
        router = router.layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::admit_client,
        ));
    } else {
        tracing::warn!("Rate limiting is disabled");
    }

    router
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Client endpoints: register, login, logout
fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/client/register", post(handlers::client::register))
        .route("/client/login", post(handlers::client::login))
        .route("/client/logout", post(handlers::client::logout))
}

/// Group endpoints
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/group/create", post(handlers::group::create_group))
        .route("/group/join", post(handlers::group::join_group))
        .route("/group/coin", post(handlers::group::pass_coin))
        .route("/group/disband", delete(handlers::group::disband_group))
        .route("/group/kick/{user}", delete(handlers::group::kick_member))
        .route("/group/{user}", get(handlers::group::get_group))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
