//! In-memory auto-trade rule repository.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::auto_trade::{AutoTradeRule, AutoTradeRuleRepository, RepositoryError, RuleKey};
use crate::domain::shared::UserId;

/// In-memory implementation of `AutoTradeRuleRepository`.
///
/// Rules are kept for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryAutoTradeRuleRepository {
    rules: RwLock<HashMap<RuleKey, AutoTradeRule>>,
}

impl InMemoryAutoTradeRuleRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rules in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }
}

#[async_trait]
impl AutoTradeRuleRepository for InMemoryAutoTradeRuleRepository {
    async fn find(&self, key: &RuleKey) -> Result<Option<AutoTradeRule>, RepositoryError> {
        Ok(self.rules.read().get(key).cloned())
    }

    async fn save(&self, rule: &AutoTradeRule) -> Result<(), RepositoryError> {
        self.rules.write().insert(rule.key(), rule.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AutoTradeRule>, RepositoryError> {
        Ok(self
            .rules
            .read()
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_enabled(&self) -> Result<Vec<AutoTradeRule>, RepositoryError> {
        Ok(self
            .rules
            .read()
            .values()
            .filter(|r| r.enabled())
            .cloned()
            .collect())
    }
}
