//! Persistence Adapters
//!
//! In-memory implementations of the domain stores.

pub mod auto_trade_rules;
pub mod recent_orders;

pub use auto_trade_rules::InMemoryAutoTradeRuleRepository;
pub use recent_orders::{InMemoryRecentOrderStore, spawn_purge_task};
