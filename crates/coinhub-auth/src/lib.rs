//! # coinhub-auth
//!
//! Request-path security state for CoinHub.
//!
//! ## Modules
//!
//! - `session`: in-memory session tokens bound to one user and one client
//!   address, with the authentication check that consumes them
//! - `ratelimit`: per-address fixed-window admission with escalating lockout
//! - `password`: Argon2id hashing and username/password character rules
//!
//! Both stores are plain owned values guarded by a single Tokio mutex each.
//! Public methods take the lock exactly once; private helpers operate on the
//! already-locked state and never lock themselves.

pub mod password;
pub mod ratelimit;
pub mod session;

pub use password::{CredentialValidator, PasswordHasher};
pub use ratelimit::{Admission, RateLimitPolicy, RateLimiter, Visitor};
pub use session::{AuthOutcome, Session, SessionStore, Unauthenticated};
