//! Fixed-window rate limiter keyed by client address.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use coinhub_core::config::RateLimitConfig;
use coinhub_core::traits::Sweepable;

use super::visitor::Visitor;

/// Decision returned by [`RateLimiter::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Process the request.
    Allow,
    /// Terminate the request with 429 and do nothing else.
    Reject,
}

impl Admission {
    /// Whether the request may proceed.
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Window, limit, and lockout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Accounting window length.
    pub window: Duration,
    /// Requests admitted per window.
    pub max_requests: u32,
    /// Extra time added to the window when the limit is exceeded.
    pub lockout: Duration,
    /// Extra time added for every request received while locked.
    pub escalation: Duration,
}

impl From<&RateLimitConfig> for RateLimitPolicy {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            window: config.window(),
            max_requests: config.max_requests,
            lockout: config.lockout(),
            escalation: config.escalation(),
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

/// In-memory per-address rate limiter.
///
/// A client gets `max_requests` admissions per window. The first request
/// past that locks it out for `lockout` beyond the window end, and each
/// further request while locked adds `escalation` more, without a cap. Once
/// the (possibly extended) window lapses, the next request starts over.
#[derive(Debug)]
pub struct RateLimiter {
    /// Address → accounting record.
    visitors: Mutex<HashMap<IpAddr, Visitor>>,
    /// Admission parameters.
    policy: RateLimitPolicy,
}

impl RateLimiter {
    /// Creates an empty limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_policy(RateLimitPolicy::from(config))
    }

    /// Creates an empty limiter with an explicit policy.
    pub fn with_policy(policy: RateLimitPolicy) -> Self {
        Self {
            visitors: Mutex::new(HashMap::new()),
            policy,
        }
    }

    /// Records a request from `address` and decides whether to admit it.
    ///
    /// The whole check-then-update sequence runs under one lock
    /// acquisition.
    pub async fn admit(&self, address: IpAddr) -> Admission {
        let mut visitors = self.visitors.lock().await;
        let now = Instant::now();

        let visitor = match visitors.entry(address) {
            Entry::Vacant(slot) => {
                debug!(address = %address, "Tracking new visitor");
                slot.insert(Visitor::first_request(address, now, self.policy.window));
                return Admission::Allow;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        if visitor.is_expired_at(now) {
            visitor.start_window(now, self.policy.window);
            return Admission::Allow;
        }

        if visitor.locked {
            visitor.extend_lockout(self.policy.escalation);
            return Admission::Reject;
        }

        if visitor.request_count >= self.policy.max_requests {
            visitor.lock_out(self.policy.lockout);
            warn!(
                address = %address,
                requests = visitor.request_count,
                "Visitor exceeded request limit, locking out"
            );
            return Admission::Reject;
        }

        visitor.record_request();
        Admission::Allow
    }

    /// Returns a copy of the record for `address`, if tracked.
    pub async fn visitor(&self, address: IpAddr) -> Option<Visitor> {
        self.visitors.lock().await.get(&address).cloned()
    }

    /// Removes every visitor whose window or lockout has lapsed.
    ///
    /// Returns the number of visitors removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut visitors = self.visitors.lock().await;
        let now = Instant::now();

        let before = visitors.len();
        visitors.retain(|_, visitor| !visitor.is_expired_at(now));
        before - visitors.len()
    }

    /// Number of tracked visitors.
    pub async fn len(&self) -> usize {
        self.visitors.lock().await.len()
    }

    /// Whether no visitors are tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Sweepable for RateLimiter {
    fn name(&self) -> &'static str {
        "visitors"
    }

    async fn sweep(&self) -> usize {
        self.sweep_expired().await
    }
}
