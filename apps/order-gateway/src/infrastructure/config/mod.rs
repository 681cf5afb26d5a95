//! Dependency wiring.

mod container;

pub use container::{
    Container, GatewayAutoTradeController, GatewayPlaceOrderUseCase, GatewayState,
};
