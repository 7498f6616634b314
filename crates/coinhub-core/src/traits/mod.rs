//! Traits shared across crate boundaries.

pub mod sweep;

pub use sweep::Sweepable;
