//! In-memory signal evaluator registry.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{EvaluatorError, SignalEvaluatorPort};
use crate::domain::auto_trade::{AutoTradeRule, RuleKey};

/// Records which rules are registered for signal evaluation.
#[derive(Debug, Default)]
pub struct InMemorySignalRegistry {
    registered: RwLock<HashSet<RuleKey>>,
}

impl InMemorySignalRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is currently registered.
    #[must_use]
    pub fn is_registered(&self, key: &RuleKey) -> bool {
        self.registered.read().contains(key)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registered.read().len()
    }
}

#[async_trait]
impl SignalEvaluatorPort for InMemorySignalRegistry {
    async fn register(&self, rule: &AutoTradeRule) -> Result<(), EvaluatorError> {
        self.registered.write().insert(rule.key());
        tracing::debug!(rule = %rule.key(), "Rule registered for signal evaluation");
        Ok(())
    }

    async fn deregister(&self, rule: &AutoTradeRule) -> Result<(), EvaluatorError> {
        self.registered.write().remove(&rule.key());
        tracing::debug!(rule = %rule.key(), "Rule deregistered from signal evaluation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order_intake::OrderSide;
    use crate::domain::shared::{Timestamp, UserId};

    #[tokio::test]
    async fn register_and_deregister() {
        let registry = InMemorySignalRegistry::new();
        let rule = AutoTradeRule::new(UserId::new("alice"), OrderSide::Buy, Timestamp::now());

        registry.register(&rule).await.unwrap();
        assert!(registry.is_registered(&rule.key()));
        assert_eq!(registry.registered_count(), 1);

        registry.deregister(&rule).await.unwrap();
        assert!(!registry.is_registered(&rule.key()));
    }
}
