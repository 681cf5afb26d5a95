//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod place_order;
mod set_auto_trade;

pub use place_order::{PlaceOrderError, PlaceOrderUseCase};
pub use set_auto_trade::AutoTradeController;
