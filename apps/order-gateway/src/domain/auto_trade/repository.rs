//! Auto-Trade Rule Repository Trait
//!
//! Persistence abstraction for auto-trade rules.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::errors::RepositoryError;
use super::rule::{AutoTradeRule, RuleKey};
use crate::domain::shared::UserId;

/// Repository trait for auto-trade rules.
///
/// Holds at most one rule per [`RuleKey`]; `save` is an upsert.
#[async_trait]
pub trait AutoTradeRuleRepository: Send + Sync {
    /// Find the rule for a user and side.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find(&self, key: &RuleKey) -> Result<Option<AutoTradeRule>, RepositoryError>;

    /// Insert or replace a rule.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, rule: &AutoTradeRule) -> Result<(), RepositoryError>;

    /// All rules owned by a user.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<AutoTradeRule>, RepositoryError>;

    /// All enabled rules.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_enabled(&self) -> Result<Vec<AutoTradeRule>, RepositoryError>;
}
