//! The in-memory session record.

use std::net::IpAddr;

use tokio::time::Instant;

/// Server-issued proof of identity for one user from one client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque random token presented by the client.
    pub token: String,
    /// Username this session authenticates.
    pub owner: String,
    /// Client address captured at issuance.
    pub bound_address: IpAddr,
    /// Monotonic instant after which the session is no longer valid.
    pub expires_at: Instant,
}

impl Session {
    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Whether a request claiming `username` from `address` may use this
    /// session. Both must match exactly.
    pub fn is_presented_by(&self, username: &str, address: IpAddr) -> bool {
        self.owner == username && self.bound_address == address
    }
}
