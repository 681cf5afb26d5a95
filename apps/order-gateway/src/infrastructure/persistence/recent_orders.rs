//! In-memory recent order-id store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::domain::order_intake::{DedupKey, RecentOrderStore};
use crate::domain::shared::Timestamp;
use crate::observability::set_dedup_entries;

/// In-memory implementation of `RecentOrderStore`.
///
/// A single mutex guards the map, which makes the reserve check and insert
/// one atomic step.
#[derive(Debug)]
pub struct InMemoryRecentOrderStore {
    entries: Mutex<HashMap<DedupKey, Timestamp>>,
    retention: chrono::Duration,
}

impl InMemoryRecentOrderStore {
    /// Create an empty store that holds keys for `retention`.
    #[must_use]
    pub fn new(retention: chrono::Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            retention,
        }
    }

    fn is_live(&self, reserved_at: Timestamp, now: Timestamp) -> bool {
        now.duration_since(reserved_at) < self.retention
    }
}

impl RecentOrderStore for InMemoryRecentOrderStore {
    fn try_reserve(&self, key: &DedupKey, now: Timestamp) -> bool {
        let mut entries = self.entries.lock();
        if let Some(&reserved_at) = entries.get(key)
            && self.is_live(reserved_at, now)
        {
            return false;
        }
        entries.insert(key.clone(), now);
        true
    }

    fn release(&self, key: &DedupKey) {
        self.entries.lock().remove(key);
    }

    fn purge_expired(&self, now: Timestamp) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, reserved_at| self.is_live(*reserved_at, now));
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

/// Spawn a task purging expired entries every `interval` until `cancel` fires.
pub fn spawn_purge_task<S>(
    store: Arc<S>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: RecentOrderStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!("Dedup purge task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = store.purge_expired(Timestamp::now());
                    let remaining = store.len();
                    set_dedup_entries(remaining);
                    if removed > 0 {
                        tracing::debug!(removed, remaining, "Purged expired idempotency keys");
                    }
                }
            }
        }
    })
}
