//! Per-address accounting record.

use std::net::IpAddr;
use std::time::Duration;

use tokio::time::Instant;

/// Request accounting for one client address.
///
/// A lockout is not a separate timer: it is encoded by pushing
/// `window_expires_at` further out while `locked` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visitor {
    /// Client address this record counts for.
    pub address: IpAddr,
    /// Requests admitted in the current window.
    pub request_count: u32,
    /// End of the current window or, when locked, of the lockout.
    pub window_expires_at: Instant,
    /// Set once the client exceeded the limit inside the window.
    pub locked: bool,
}

impl Visitor {
    pub(crate) fn first_request(address: IpAddr, now: Instant, window: Duration) -> Self {
        Self {
            address,
            request_count: 1,
            window_expires_at: now + window,
            locked: false,
        }
    }

    /// Whether the window (or lockout) has lapsed at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.window_expires_at
    }

    pub(crate) fn start_window(&mut self, now: Instant, window: Duration) {
        self.request_count = 1;
        self.window_expires_at = now + window;
        self.locked = false;
    }

    pub(crate) fn lock_out(&mut self, lockout: Duration) {
        self.locked = true;
        self.window_expires_at += lockout;
    }

    pub(crate) fn extend_lockout(&mut self, step: Duration) {
        self.window_expires_at += step;
    }

    pub(crate) fn record_request(&mut self) {
        self.request_count += 1;
    }
}
