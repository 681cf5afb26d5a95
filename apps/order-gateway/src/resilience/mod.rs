//! Resilience patterns for external service calls.
//!
//! Retry with exponential backoff for execution backend submissions.

mod retry;

pub use retry::{ErrorCategory, ExponentialBackoffCalculator, RetryPolicy};
