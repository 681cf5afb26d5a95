//! Observability module for logging and metrics.
//!
//! Structured logging via `tracing` and Prometheus metrics export.

mod logging;
mod metrics;

pub use logging::{LoggingError, init_logging};
pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_auto_trade_toggle, record_order_request,
    record_route_attempt, record_route_latency, set_dedup_entries,
};
