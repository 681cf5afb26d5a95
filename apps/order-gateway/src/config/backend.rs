//! Simulated execution backend configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settings for the in-process execution backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Limit orders above this notional are rejected for insufficient funds.
    #[serde(default)]
    pub max_notional: Option<Decimal>,
    /// Artificial latency added to each submission, in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,
}
