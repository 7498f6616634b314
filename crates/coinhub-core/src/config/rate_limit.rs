//! Per-client admission (rate limiting) configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Fixed-window rate limiting with escalating lockout.
///
/// A client may make `max_requests` requests per `window_seconds`. The
/// next request inside the same window locks the client out for an extra
/// `lockout_seconds`, and every request received while locked pushes the
/// unlock time out by another `escalation_seconds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether the admission check runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Length of an accounting window in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Requests admitted per window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    /// Lockout added to the window when the limit is exceeded.
    #[serde(default = "default_lockout")]
    pub lockout_seconds: u64,
    /// Lockout extension per request received while locked.
    #[serde(default = "default_escalation")]
    pub escalation_seconds: u64,
    /// Interval between expired-visitor sweeps in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl RateLimitConfig {
    /// Window length as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_seconds)
    }

    /// Lockout length as a [`Duration`].
    pub fn lockout(&self) -> Duration {
        Duration::from_secs(self.lockout_seconds)
    }

    /// Escalation step as a [`Duration`].
    pub fn escalation(&self) -> Duration {
        Duration::from_secs(self.escalation_seconds)
    }

    /// Sweep interval as a [`Duration`].
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            window_seconds: default_window(),
            max_requests: default_max_requests(),
            lockout_seconds: default_lockout(),
            escalation_seconds: default_escalation(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_window() -> u64 {
    10
}

fn default_max_requests() -> u32 {
    5
}

fn default_lockout() -> u64 {
    10
}

fn default_escalation() -> u64 {
    1
}

fn default_cleanup_interval() -> u64 {
    60
}
