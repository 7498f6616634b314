//! # coinhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for users and coin groups.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
