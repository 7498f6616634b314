//! # coinhub-worker
//!
//! Background housekeeping for CoinHub. Each in-memory store gets one
//! [`Sweeper`] that prunes expired entries on a fixed interval until the
//! shared shutdown signal fires.

pub mod sweeper;

pub use sweeper::Sweeper;
