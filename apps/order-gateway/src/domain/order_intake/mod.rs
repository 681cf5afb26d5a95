//! Order Intake Bounded Context
//!
//! Turns raw client order requests into validated orders and
//! acknowledgments.
//!
//! # Key Concepts
//!
//! - **Order**: a validated buy or sell instruction; market when no price
//! - **Idempotency key**: `clientOrderId`, unique per client within a
//!   retention window
//! - **Order Ack**: the single terminal answer for one routed order

pub mod ack;
pub mod errors;
pub mod order;
pub mod order_side;
pub mod recent_orders;
pub mod validator;

pub use ack::{AckStatus, OrderAck};
pub use errors::ValidationError;
pub use order::{DedupKey, Order, OrderRequest};
pub use order_side::{OrderSide, OrderType};
pub use recent_orders::RecentOrderStore;
pub use validator::OrderValidator;
