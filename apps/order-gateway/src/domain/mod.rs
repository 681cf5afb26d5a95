//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Aggregates**: Consistency boundaries with invariants
//! - **Repository Traits**: Persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`order_intake`]: Order validation, idempotency and acknowledgment
//! - [`auto_trade`]: Per-user auto-trade rules

pub mod auto_trade;
pub mod order_intake;
pub mod shared;
