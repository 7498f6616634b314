//! # coinhub-api
//!
//! HTTP API layer for CoinHub built on Axum.
//!
//! Every request first passes the per-address rate limiter. Client
//! endpoints register users and hand out session tokens; group endpoints
//! authenticate the `Token`/`Username` header pair against the session
//! store before touching the database.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
