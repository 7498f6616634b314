//! Periodic housekeeping contract for in-memory TTL stores.

use async_trait::async_trait;

/// A store whose expired entries can be pruned in one pass.
///
/// Implementors acquire their own lock inside [`Sweepable::sweep`]; the
/// caller never holds it. A sweep must be safe to run at any moment and
/// must not change the outcome of any later lookup other than freeing
/// memory held by entries that are already expired.
#[async_trait]
pub trait Sweepable: Send + Sync {
    /// Short name used in log lines (`"sessions"`, `"visitors"`).
    fn name(&self) -> &'static str;

    /// Remove every expired entry and return how many were removed.
    async fn sweep(&self) -> usize;
}
