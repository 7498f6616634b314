//! In-memory session store with a token index and a per-user reverse index.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use coinhub_core::config::SessionConfig;
use coinhub_core::traits::Sweepable;

use super::model::Session;

/// Token and owner indexes, always mutated together.
///
/// Every method assumes the caller already holds the store lock.
#[derive(Debug, Default)]
pub(super) struct SessionIndex {
    /// Token → session.
    by_token: HashMap<String, Session>,
    /// Username → token of that user's live session.
    by_owner: HashMap<String, String>,
}

impl SessionIndex {
    pub(super) fn get(&self, token: &str) -> Option<&Session> {
        self.by_token.get(token)
    }

    fn insert(&mut self, session: Session) {
        self.by_owner
            .insert(session.owner.clone(), session.token.clone());
        self.by_token.insert(session.token.clone(), session);
    }

    /// Removes a session from both indexes.
    ///
    /// The owner entry is only dropped while it still points at `token`, so
    /// removing a stale token can never detach the owner's newer session.
    pub(super) fn remove(&mut self, token: &str) -> Option<Session> {
        let session = self.by_token.remove(token)?;
        if self
            .by_owner
            .get(&session.owner)
            .is_some_and(|current| current == token)
        {
            self.by_owner.remove(&session.owner);
        }
        Some(session)
    }

    fn remove_owner(&mut self, username: &str) -> Option<Session> {
        let token = self.by_owner.get(username)?.clone();
        self.remove(&token)
    }

    fn expired_tokens(&self, now: Instant) -> Vec<String> {
        self.by_token
            .values()
            .filter(|session| session.is_expired_at(now))
            .map(|session| session.token.clone())
            .collect()
    }
}

/// Concurrency-safe session store.
///
/// Holds at most one live session per username. Shared behind an `Arc`
/// between request handlers and the background sweeper.
#[derive(Debug)]
pub struct SessionStore {
    /// Both indexes behind one lock.
    pub(super) index: Mutex<SessionIndex>,
    /// Lifetime given to every new session.
    lifetime: Duration,
}

impl SessionStore {
    /// Creates an empty store from configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_lifetime(config.lifetime())
    }

    /// Creates an empty store whose sessions live for `lifetime`.
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            index: Mutex::new(SessionIndex::default()),
            lifetime,
        }
    }

    /// Issues a fresh session for `username` bound to `address` and returns
    /// its token.
    ///
    /// Any session the user already holds is removed first. Both steps run
    /// under one lock acquisition, so concurrent logins for the same user
    /// never leave two live tokens behind.
    pub async fn issue(&self, address: IpAddr, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            token: token.clone(),
            owner: username.to_string(),
            bound_address: address,
            expires_at: Instant::now() + self.lifetime,
        };

        let mut index = self.index.lock().await;
        if index.remove_owner(username).is_some() {
            debug!(username = %username, "Refreshing session");
        }
        index.insert(session);

        info!(username = %username, address = %address, "Session issued");
        token
    }

    /// Returns whether `token` names a stored session, expired or not.
    pub async fn exists(&self, token: &str) -> bool {
        self.index.lock().await.get(token).is_some()
    }

    /// Returns a copy of the session for `token`, if any.
    pub async fn lookup(&self, token: &str) -> Option<Session> {
        self.index.lock().await.get(token).cloned()
    }

    /// Returns the token of the live session owned by `username`, if any.
    pub async fn token_for(&self, username: &str) -> Option<String> {
        self.index.lock().await.by_owner.get(username).cloned()
    }

    /// Removes the session for `token` from both indexes.
    ///
    /// Idempotent: returns `false` when there was nothing to remove.
    pub async fn invalidate(&self, token: &str) -> bool {
        let removed = self.index.lock().await.remove(token);
        match removed {
            Some(session) => {
                debug!(username = %session.owner, "Session invalidated");
                true
            }
            None => false,
        }
    }

    /// Removes every session whose lifetime has elapsed.
    ///
    /// Returns the number of sessions removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut index = self.index.lock().await;
        let now = Instant::now();

        let expired = index.expired_tokens(now);
        for token in &expired {
            if let Some(session) = index.remove(token) {
                debug!(username = %session.owner, "Removing expired session");
            }
        }
        expired.len()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.index.lock().await.by_token.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl Sweepable for SessionStore {
    fn name(&self) -> &'static str {
        "sessions"
    }

    async fn sweep(&self) -> usize {
        self.sweep_expired().await
    }
}
