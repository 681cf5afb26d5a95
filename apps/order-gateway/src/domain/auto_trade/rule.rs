//! Auto-trade rule aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::order_intake::OrderSide;
use crate::domain::shared::{Timestamp, UserId};

/// State of an auto-trade rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoTradeState {
    /// Automatic orders are off. Initial state.
    Disabled,
    /// Automatic orders are on.
    Enabled,
}

impl fmt::Display for AutoTradeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "DISABLED"),
            Self::Enabled => write!(f, "ENABLED"),
        }
    }
}

/// Outcome of applying a toggle to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Disabled -> Enabled.
    Activated,
    /// Enabled -> Disabled.
    Deactivated,
    /// State did not change.
    Unchanged,
}

impl Transition {
    /// Label used for metrics and log fields.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Self::Activated => "activated",
            Self::Deactivated => "deactivated",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Identity of a rule: one per user and side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    /// Owning user.
    pub user_id: UserId,
    /// Side the rule trades.
    pub side: OrderSide,
}

impl RuleKey {
    /// Create a rule key.
    #[must_use]
    pub const fn new(user_id: UserId, side: OrderSide) -> Self {
        Self { user_id, side }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.side)
    }
}

/// Standing instruction to place orders on one side when a signal fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoTradeRule {
    user_id: UserId,
    side: OrderSide,
    enabled: bool,
    updated_at: Timestamp,
}

impl AutoTradeRule {
    /// A rule in its initial, disabled state.
    #[must_use]
    pub const fn new(user_id: UserId, side: OrderSide, now: Timestamp) -> Self {
        Self {
            user_id,
            side,
            enabled: false,
            updated_at: now,
        }
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Side the rule trades.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Whether the rule is enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Time of the last toggle.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AutoTradeState {
        if self.enabled {
            AutoTradeState::Enabled
        } else {
            AutoTradeState::Disabled
        }
    }

    /// Key identifying this rule.
    #[must_use]
    pub fn key(&self) -> RuleKey {
        RuleKey::new(self.user_id.clone(), self.side)
    }

    /// Set the rule to `enabled`.
    ///
    /// Repeating the current state is allowed and still refreshes
    /// `updated_at`.
    pub fn apply(&mut self, enabled: bool, now: Timestamp) -> Transition {
        let transition = match (self.enabled, enabled) {
            (false, true) => Transition::Activated,
            (true, false) => Transition::Deactivated,
            _ => Transition::Unchanged,
        };
        self.enabled = enabled;
        self.updated_at = now;
        transition
    }
}
