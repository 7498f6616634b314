//! Session tokens: issuance, lookup, invalidation, expiry, and the
//! authentication check performed on protected endpoints.

pub mod check;
pub mod model;
pub mod store;

pub use check::{AuthOutcome, Unauthenticated};
pub use model::Session;
pub use store::SessionStore;
