//! Authentication check for requests presenting a session token.

use std::fmt;
use std::net::IpAddr;

use tokio::time::Instant;
use tracing::warn;

use super::model::Session;
use super::store::SessionStore;

/// Why a presented token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unauthenticated {
    /// No session exists for the token.
    TokenNotFound,
    /// The session outlived its lifetime.
    Expired,
    /// The request's address or claimed username differs from the session.
    Mismatched,
}

impl fmt::Display for Unauthenticated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenNotFound => write!(f, "token not found"),
            Self::Expired => write!(f, "session expired"),
            Self::Mismatched => write!(f, "session does not match request"),
        }
    }
}

/// Result of [`SessionStore::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The token is valid for this user and address.
    Authenticated(Session),
    /// The token was rejected.
    Unauthenticated(Unauthenticated),
}

impl AuthOutcome {
    /// Whether the request was authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl SessionStore {
    /// Checks `token` against the claimed username and the request address.
    ///
    /// Postcondition: when the session exists but is expired, or its bound
    /// address or owner differ from the request, the session is removed
    /// before returning. A suspect token is destroyed, not merely refused,
    /// so later requests with the same token fail with
    /// [`Unauthenticated::TokenNotFound`].
    pub async fn authenticate(
        &self,
        token: &str,
        claimed_username: &str,
        address: IpAddr,
    ) -> AuthOutcome {
        let mut index = self.index.lock().await;
        let Some(session) = index.get(token) else {
            return AuthOutcome::Unauthenticated(Unauthenticated::TokenNotFound);
        };

        let rejection = if session.is_expired_at(Instant::now()) {
            Some(Unauthenticated::Expired)
        } else if !session.is_presented_by(claimed_username, address) {
            Some(Unauthenticated::Mismatched)
        } else {
            None
        };

        match rejection {
            None => AuthOutcome::Authenticated(session.clone()),
            Some(reason) => {
                if let Some(session) = index.remove(token) {
                    warn!(
                        owner = %session.owner,
                        bound_address = %session.bound_address,
                        claimed_username = %claimed_username,
                        address = %address,
                        reason = %reason,
                        "Session rejected and invalidated"
                    );
                }
                AuthOutcome::Unauthenticated(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SIX_HOURS: Duration = Duration::from_secs(6 * 60 * 60);

    fn addr(last: u8) -> IpAddr {
        IpAddr::from([10, 0, 0, last])
    }

    #[tokio::test]
    async fn test_fresh_session_authenticates() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let token = store.issue(addr(1), "alice").await;

        match store.authenticate(&token, "alice", addr(1)).await {
            AuthOutcome::Authenticated(session) => {
                assert_eq!(session.token, token);
                assert_eq!(session.owner, "alice");
            }
            other => panic!("expected authenticated, got {other:?}"),
        }
        assert!(store.exists(&token).await);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        assert_eq!(
            store.authenticate("bogus", "alice", addr(1)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::TokenNotFound)
        );
    }

    #[tokio::test]
    async fn test_replaced_token_is_rejected() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let first = store.issue(addr(1), "alice").await;
        let second = store.issue(addr(1), "alice").await;

        assert_eq!(
            store.authenticate(&first, "alice", addr(1)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::TokenNotFound)
        );
        assert!(store.authenticate(&second, "alice", addr(1)).await.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_until_just_before_lifetime() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let token = store.issue(addr(1), "alice").await;

        tokio::time::advance(SIX_HOURS - Duration::from_millis(1)).await;
        assert!(store.authenticate(&token, "alice", addr(1)).await.is_authenticated());
        assert!(store.authenticate(&token, "alice", addr(1)).await.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_at_lifetime_and_removed() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let token = store.issue(addr(1), "alice").await;

        tokio::time::advance(SIX_HOURS).await;
        assert_eq!(
            store.authenticate(&token, "alice", addr(1)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::Expired)
        );
        assert!(!store.exists(&token).await);
        assert_eq!(store.token_for("alice").await, None);
    }

    #[tokio::test]
    async fn test_address_mismatch_destroys_session() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let token = store.issue(addr(1), "alice").await;

        assert_eq!(
            store.authenticate(&token, "alice", addr(2)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::Mismatched)
        );
        assert_eq!(
            store.authenticate(&token, "alice", addr(1)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::TokenNotFound)
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_owner_mismatch_destroys_session() {
        let store = SessionStore::with_lifetime(SIX_HOURS);
        let alice = store.issue(addr(1), "alice").await;
        let bob = store.issue(addr(1), "bob").await;

        assert_eq!(
            store.authenticate(&alice, "bob", addr(1)).await,
            AuthOutcome::Unauthenticated(Unauthenticated::Mismatched)
        );
        assert!(!store.exists(&alice).await);
        assert_eq!(store.token_for("alice").await, None);
        // Bob's own session is untouched.
        assert!(store.authenticate(&bob, "bob", addr(1)).await.is_authenticated());
    }
}
