//! Auto-Trade Bounded Context
//!
//! Per-user, per-side switches that let a signal evaluator place orders
//! automatically. Each rule is a two-state machine (`Disabled`, `Enabled`)
//! with idempotent transitions and no terminal state.

pub mod errors;
pub mod repository;
pub mod rule;

pub use errors::{ControllerError, RepositoryError};
pub use repository::AutoTradeRuleRepository;
pub use rule::{AutoTradeRule, AutoTradeState, RuleKey, Transition};
