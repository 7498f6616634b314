//! # coinhub-core
//!
//! Core crate for CoinHub. Contains configuration schemas, the unified
//! error system, and the traits shared between the in-memory stores and
//! the background worker.
//!
//! This crate has **no** internal dependencies on other CoinHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
