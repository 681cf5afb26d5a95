//! Recent order-id store.
//!
//! Persistence abstraction for the idempotency cache consulted by the
//! validator. Implemented by adapters in the infrastructure layer.

use super::order::DedupKey;
use crate::domain::shared::Timestamp;

/// Store of `(client, clientOrderId)` keys seen within a retention window.
///
/// Implementations own the retention window and must make
/// [`try_reserve`](Self::try_reserve) a single atomic compare-and-insert.
pub trait RecentOrderStore: Send + Sync {
    /// Reserve `key` at `now`.
    ///
    /// Returns `false` if the key is already held and has not expired.
    /// An expired entry is replaced.
    fn try_reserve(&self, key: &DedupKey, now: Timestamp) -> bool;

    /// Drop a reservation so the key may be submitted again.
    fn release(&self, key: &DedupKey);

    /// Remove entries older than the retention window, returning how many
    /// were removed.
    fn purge_expired(&self, now: Timestamp) -> usize;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Returns true if no entries are held.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
