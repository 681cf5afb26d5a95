//! Idempotency cache configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for dedup retention and purge interval: ten years.
pub const MAX_DEDUP_SECS: u64 = 10 * 365 * 86_400;

/// Retention and purge settings for recent client order IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// How long a `clientOrderId` stays reserved, in seconds.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    /// Interval between purges of expired entries, in seconds.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            retention_secs: default_retention_secs(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl DedupConfig {
    /// Retention window as a chrono duration, capped at [`MAX_DEDUP_SECS`].
    #[must_use]
    pub fn retention(&self) -> chrono::Duration {
        let secs = i64::try_from(self.retention_secs.min(MAX_DEDUP_SECS)).unwrap_or_default();
        chrono::Duration::try_seconds(secs).unwrap_or_default()
    }

    /// Purge interval, capped at [`MAX_DEDUP_SECS`].
    #[must_use]
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs.min(MAX_DEDUP_SECS))
    }
}

const fn default_retention_secs() -> u64 {
    86_400
}

const fn default_purge_interval_secs() -> u64 {
    60
}
