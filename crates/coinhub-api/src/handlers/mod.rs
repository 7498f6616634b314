//! HTTP handlers organized by domain.

pub mod client;
pub mod group;
pub mod health;
