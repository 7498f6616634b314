//! # coinhub-entity
//!
//! Database row models for CoinHub. Sessions and rate-limit visitors are
//! not entities: they live only in memory and are owned by `coinhub-auth`.

pub mod group;
pub mod user;

pub use group::{Group, GroupDetails};
pub use user::User;
