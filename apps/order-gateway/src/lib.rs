// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Order Gateway - Rust Core Library
//!
//! Order intake and auto-trade toggle service.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (value objects, rules, validation)
//!   - `order_intake`: Order requests, validation, idempotency keys, acks
//!   - `auto_trade`: Per-user, per-side auto-trade rules
//!   - `shared`: Identifiers, symbols, quantities, prices, timestamps
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for collaborators (`ExecutionBackendPort`,
//!     `IdentityResolverPort`, `SignalEvaluatorPort`)
//!   - `services`: `OrderRouter` with bounded retry, keyed locks
//!   - `use_cases`: `PlaceOrder`, `AutoTradeController`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: Axum REST API
//!   - `persistence`: In-memory dedup store and rule repository
//!   - `execution`, `identity`, `signals`: In-process collaborators
//!   - `config`: Dependency injection container
//!
//! Cross-cutting: `config` (YAML settings), `resilience` (retry policy),
//! `observability` (logging, metrics), `error` (HTTP error codes).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting Modules
// =============================================================================

/// YAML configuration with environment interpolation.
pub mod config;

/// Client-facing error codes.
pub mod error;

/// Logging and metrics.
pub mod observability;

/// Retry policy and backoff.
pub mod resilience;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::auto_trade::{AutoTradeRule, AutoTradeState, ControllerError, RuleKey};
pub use domain::order_intake::{
    AckStatus, Order, OrderAck, OrderRequest, OrderSide, OrderType, OrderValidator,
    ValidationError,
};
pub use domain::shared::{
    ClientId, ClientOrderId, OrderId, Price, Quantity, ReceiptId, Symbol, Timestamp, UserId,
};

// Application re-exports
pub use application::ports::{
    BackendError, ExecutionBackendPort, IdentityResolverPort, SignalEvaluatorPort,
};
pub use application::services::{OrderRouter, RoutingError};
pub use application::use_cases::{AutoTradeController, PlaceOrderError, PlaceOrderUseCase};

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::http::{AppState, create_router};

// Cross-cutting re-exports
pub use config::{Config, ConfigError, load_config, load_config_or_default};
pub use error::{ErrorCode, GatewayError};
pub use resilience::RetryPolicy;
