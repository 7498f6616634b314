//! Per-client admission control: fixed windows with escalating lockout.

pub mod limiter;
pub mod visitor;

pub use limiter::{Admission, RateLimitPolicy, RateLimiter};
pub use visitor::Visitor;
