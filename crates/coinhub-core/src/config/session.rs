//! Session store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours, counted from issuance.
    #[serde(default = "default_lifetime")]
    pub lifetime_hours: u64,
    /// Interval between expired-session sweeps in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl SessionConfig {
    /// Session lifetime as a [`Duration`].
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_hours * 60 * 60)
    }

    /// Sweep interval as a [`Duration`].
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_minutes * 60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime_hours: default_lifetime(),
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_lifetime() -> u64 {
    6
}

fn default_cleanup_interval() -> u64 {
    10
}
