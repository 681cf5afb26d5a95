//! Signal Evaluator Port (Driven Port)
//!
//! Registration interface of the component that fires auto-trade orders.

use async_trait::async_trait;

use crate::domain::auto_trade::AutoTradeRule;

/// Signal evaluator error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    /// The evaluator could not be reached.
    #[error("Signal evaluator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for registering auto-trade rules with the signal evaluator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignalEvaluatorPort: Send + Sync {
    /// Start evaluating signals for an enabled rule.
    async fn register(&self, rule: &AutoTradeRule) -> Result<(), EvaluatorError>;

    /// Stop evaluating signals for a disabled rule.
    async fn deregister(&self, rule: &AutoTradeRule) -> Result<(), EvaluatorError>;
}
