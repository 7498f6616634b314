//! Periodic expiry pass over a [`Sweepable`] store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use coinhub_core::traits::Sweepable;

/// Runs [`Sweepable::sweep`] every `interval` until cancelled.
///
/// The sweep takes the store's own lock as an independent critical
/// section; it is never called from inside a request path.
pub struct Sweeper {
    /// Store to prune.
    target: Arc<dyn Sweepable>,
    /// Time between sweeps.
    interval: Duration,
}

impl std::fmt::Debug for Sweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sweeper")
            .field("target", &self.target.name())
            .field("interval", &self.interval)
            .finish()
    }
}

impl Sweeper {
    /// Create a sweeper for `target`.
    pub fn new(target: Arc<dyn Sweepable>, interval: Duration) -> Self {
        Self { target, interval }
    }

    /// Run one sweep immediately and return the number of removed entries.
    pub async fn sweep_once(&self) -> usize {
        let removed = self.target.sweep().await;
        if removed > 0 {
            tracing::info!(
                store = self.target.name(),
                removed = removed,
                "Swept expired entries"
            );
        } else {
            tracing::trace!(store = self.target.name(), "Nothing to sweep");
        }
        removed
    }

    /// Sweep on every tick until `cancel` turns `true` or its sender is
    /// dropped. The first sweep happens one full interval after start.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        tracing::info!(
            store = self.target.name(),
            interval_secs = self.interval.as_secs(),
            "Sweeper started"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
            }
        }

        tracing::info!(store = self.target.name(), "Sweeper stopped");
    }

    /// Spawn [`Sweeper::run`] on the Tokio runtime.
    pub fn spawn(self, cancel: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct CountingStore {
        sweeps: AtomicUsize,
    }

    #[async_trait]
    impl Sweepable for CountingStore {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn sweep(&self) -> usize {
            self.sweeps.fetch_add(1, Ordering::SeqCst);
            2
        }
    }

    #[tokio::test]
    async fn test_sweep_once_delegates() {
        let store = Arc::new(CountingStore::default());
        let sweeper = Sweeper::new(store.clone(), Duration::from_secs(60));

        assert_eq!(sweeper.sweep_once().await, 2);
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeps_on_each_tick_until_cancelled() {
        let store = Arc::new(CountingStore::default());
        let (tx, rx) = watch::channel(false);
        let handle = Sweeper::new(store.clone(), Duration::from_secs(60)).spawn(rx);

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_secs(31)).await;
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 3);

        tx.send(true).unwrap();
        handle.await.unwrap();

        time::sleep(Duration::from_secs(600)).await;
        assert_eq!(store.sweeps.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_sender_dropped() {
        let store = Arc::new(CountingStore::default());
        let (tx, rx) = watch::channel(false);
        let handle = Sweeper::new(store, Duration::from_secs(60)).spawn(rx);

        drop(tx);
        handle.await.unwrap();
    }
}
