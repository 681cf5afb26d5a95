//! Prometheus metrics for the order gateway.
//!
//! Recording functions are no-ops until a recorder is installed, so the
//! gateway runs unchanged with metrics disabled.
//!
//! # Example
//!
//! ```ignore
//! use order_gateway::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config)?;
//!
//! record_order_request("buy", "accepted");
//! ```

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 9090)),
            // 1ms to 10s; routing latency includes retry backoff
            latency_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Create a new metrics configuration with custom address.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            ..Default::default()
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Order Intake Metrics
// ============================================================================

/// Record the outcome of one order request.
///
/// # Arguments
///
/// * `side` - `"buy"` or `"sell"`
/// * `outcome` - e.g. `"accepted"`, `"rejected"`, `"duplicate"`, `"malformed"`,
///   `"backend_unavailable"`
pub fn record_order_request(side: &'static str, outcome: &'static str) {
    counter!(
        "order_requests_total",
        "side" => side,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record one backend submission attempt.
///
/// # Arguments
///
/// * `outcome` - `"received"`, `"already_received"`, `"rejected"`,
///   `"timeout"` or `"unavailable"`
pub fn record_route_attempt(outcome: &'static str) {
    counter!("order_route_attempts_total", "outcome" => outcome).increment(1);
}

/// Record the wall-clock duration of one routing call, retries included.
pub fn record_route_latency(latency_seconds: f64) {
    histogram!("order_route_latency_seconds").record(latency_seconds);
}

/// Update the number of held idempotency keys.
pub fn set_dedup_entries(count: usize) {
    #[allow(clippy::cast_precision_loss)]
    gauge!("dedup_entries").set(count as f64);
}

// ============================================================================
// Auto-Trade Metrics
// ============================================================================

/// Record an auto-trade toggle.
///
/// # Arguments
///
/// * `side` - `"buy"` or `"sell"`
/// * `transition` - `"activated"`, `"deactivated"` or `"unchanged"`
pub fn record_auto_trade_toggle(side: &'static str, transition: &'static str) {
    counter!(
        "auto_trade_toggles_total",
        "side" => side,
        "transition" => transition
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn config_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9191".parse().unwrap();
        let config = MetricsConfig::with_addr(addr);
        assert_eq!(config.listen_addr.port(), 9191);
    }

    #[test]
    fn latency_buckets_are_sorted() {
        let config = MetricsConfig::default();
        assert!(config.latency_buckets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn recording_without_recorder_does_not_panic() {
        record_order_request("buy", "accepted");
        record_route_attempt("timeout");
        record_route_latency(0.015);
        set_dedup_entries(3);
        record_auto_trade_toggle("sell", "activated");
    }
}
