//! Custom Axum extractors.

pub mod auth;
pub mod client;
pub mod headers;

pub use auth::AuthUser;
pub use client::ClientIp;
pub use headers::{GroupRef, required_header};
