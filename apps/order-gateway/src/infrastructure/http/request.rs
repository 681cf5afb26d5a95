//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order_intake::{OrderRequest, OrderSide};

/// Body of `POST /api/buy` and `POST /api/sell`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported by the validator with its name instead of as a body error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// Asset identifier.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Requested quantity.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Limit price; omit for a market order.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Client-supplied idempotency key.
    #[serde(default)]
    pub client_order_id: Option<String>,
}

impl PlaceOrderRequest {
    /// Attach the side taken from the route.
    #[must_use]
    pub fn into_order_request(self, side: OrderSide) -> OrderRequest {
        OrderRequest {
            side: Some(side),
            symbol: self.symbol,
            quantity: self.quantity,
            price: self.price,
            client_order_id: self.client_order_id,
        }
    }
}

/// Body of `POST /api/auto_buy` and `POST /api/auto_sell`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAutoTradeRequest {
    /// User whose rule is toggled.
    pub user_id: String,
    /// Desired state.
    pub enabled: bool,
}
