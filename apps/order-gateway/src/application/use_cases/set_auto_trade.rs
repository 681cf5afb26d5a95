//! Auto-Trade Controller Use Case

use std::sync::Arc;

use crate::application::ports::{
    EvaluatorError, IdentityError, IdentityResolverPort, SignalEvaluatorPort,
};
use crate::application::services::KeyedLocks;
use crate::domain::auto_trade::{
    AutoTradeRule, AutoTradeRuleRepository, ControllerError, RuleKey, Transition,
};
use crate::domain::order_intake::OrderSide;
use crate::domain::shared::{Timestamp, UserId};
use crate::observability::record_auto_trade_toggle;

/// Use case toggling auto-trade rules per `(userId, side)`.
///
/// Each toggle holds the rule's lock across read, evaluator
/// (de)registration, and write, so concurrent toggles of the same rule
/// are applied one after another.
pub struct AutoTradeController<I, E, R>
where
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    identity: Arc<I>,
    evaluator: Arc<E>,
    rules: Arc<R>,
    locks: KeyedLocks<RuleKey>,
}

impl<I, E, R> AutoTradeController<I, E, R>
where
    I: IdentityResolverPort,
    E: SignalEvaluatorPort,
    R: AutoTradeRuleRepository,
{
    /// Create a new `AutoTradeController`.
    #[must_use]
    pub fn new(identity: Arc<I>, evaluator: Arc<E>, rules: Arc<R>) -> Self {
        Self {
            identity,
            evaluator,
            rules,
            locks: KeyedLocks::new(),
        }
    }

    /// Enable or disable auto-trading for `user_id` on `side`.
    ///
    /// Repeating the current state succeeds, refreshes `updatedAt`, and
    /// does not touch the signal evaluator.
    ///
    /// # Errors
    ///
    /// - `UnknownUser` / `IdentityUnavailable` if the user cannot be resolved
    /// - `EvaluatorUnavailable` if (de)registration fails; the stored rule is
    ///   left unchanged
    /// - `Storage` if the rule cannot be read or written
    pub async fn set_auto_trade(
        &self,
        user_id: &str,
        side: OrderSide,
        enabled: bool,
    ) -> Result<AutoTradeRule, ControllerError> {
        let user = self.resolve(user_id).await?;
        let key = RuleKey::new(user, side);

        let _guard = self.locks.lock(&key).await;

        let now = Timestamp::now();
        let mut rule = self
            .rules
            .find(&key)
            .await?
            .unwrap_or_else(|| AutoTradeRule::new(key.user_id.clone(), side, now));

        let transition = rule.apply(enabled, now);

        match transition {
            Transition::Activated => self
                .evaluator
                .register(&rule)
                .await
                .map_err(evaluator_unavailable)?,
            Transition::Deactivated => self
                .evaluator
                .deregister(&rule)
                .await
                .map_err(evaluator_unavailable)?,
            Transition::Unchanged => {}
        }

        if let Err(err) = self.rules.save(&rule).await {
            self.undo_registration(&rule, transition).await;
            return Err(err.into());
        }

        record_auto_trade_toggle(side.as_label(), transition.as_label());
        tracing::info!(
            rule = %key,
            enabled,
            transition = transition.as_label(),
            "Auto-trade rule updated"
        );

        Ok(rule)
    }

    /// Stored rules for `user_id`, buy side first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownUser` / `IdentityUnavailable` if the user cannot be
    /// resolved, or `Storage` if the query fails.
    pub async fn rules_for(&self, user_id: &str) -> Result<Vec<AutoTradeRule>, ControllerError> {
        let user = self.resolve(user_id).await?;
        let mut rules = self.rules.find_by_user(&user).await?;
        rules.sort_by_key(|r| matches!(r.side(), OrderSide::Sell));
        Ok(rules)
    }

    async fn resolve(&self, user_id: &str) -> Result<UserId, ControllerError> {
        self.identity
            .resolve(user_id)
            .await
            .map_err(|err| match err {
                IdentityError::NotFound { user_id } => ControllerError::UnknownUser { user_id },
                IdentityError::Unavailable { message } => {
                    ControllerError::IdentityUnavailable { message }
                }
            })
    }

    async fn undo_registration(&self, rule: &AutoTradeRule, transition: Transition) {
        let undo = match transition {
            Transition::Activated => self.evaluator.deregister(rule).await,
            Transition::Deactivated => self.evaluator.register(rule).await,
            Transition::Unchanged => return,
        };
        if let Err(err) = undo {
            tracing::error!(
                rule = %rule.key(),
                error = %err,
                "Failed to undo evaluator registration after storage failure"
            );
        }
    }
}

fn evaluator_unavailable(err: EvaluatorError) -> ControllerError {
    match err {
        EvaluatorError::Unavailable { message } => ControllerError::EvaluatorUnavailable { message },
    }
}
