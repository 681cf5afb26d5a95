//! Order request and validated order.

use rust_decimal::Decimal;
use serde::Serialize;

use super::order_side::{OrderSide, OrderType};
use crate::domain::shared::{ClientId, ClientOrderId, Price, Quantity, Symbol};

/// Unvalidated order as received from a client.
///
/// Every field is optional so that missing values surface as
/// `MalformedField` rather than as a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    /// Buy or sell.
    pub side: Option<OrderSide>,
    /// Asset identifier as sent.
    pub symbol: Option<String>,
    /// Requested quantity.
    pub quantity: Option<Decimal>,
    /// Limit price; absent for market orders.
    pub price: Option<Decimal>,
    /// Client-supplied idempotency key.
    pub client_order_id: Option<String>,
}

/// Key under which an order submission is deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Submitting client.
    pub client: ClientId,
    /// Idempotency key within that client.
    pub client_order_id: ClientOrderId,
}

impl DedupKey {
    /// Create a dedup key.
    #[must_use]
    pub const fn new(client: ClientId, client_order_id: ClientOrderId) -> Self {
        Self {
            client,
            client_order_id,
        }
    }
}

/// A validated order.
///
/// Only constructed by the validator, so holding one means every field
/// invariant has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip)]
    client: ClientId,
    side: OrderSide,
    symbol: Symbol,
    quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
    client_order_id: ClientOrderId,
}

impl Order {
    pub(crate) const fn new(
        client: ClientId,
        side: OrderSide,
        symbol: Symbol,
        quantity: Quantity,
        price: Option<Price>,
        client_order_id: ClientOrderId,
    ) -> Self {
        Self {
            client,
            side,
            symbol,
            quantity,
            price,
            client_order_id,
        }
    }

    /// Submitting client.
    #[must_use]
    pub const fn client(&self) -> &ClientId {
        &self.client
    }

    /// Order side.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// Asset identifier.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Order quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Limit price, if any.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        self.price
    }

    /// Idempotency key.
    #[must_use]
    pub const fn client_order_id(&self) -> &ClientOrderId {
        &self.client_order_id
    }

    /// `Market` without a price, `Limit` with one.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        if self.price.is_some() {
            OrderType::Limit
        } else {
            OrderType::Market
        }
    }

    /// Key used for deduplication and resubmission detection.
    #[must_use]
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.client.clone(), self.client_order_id.clone())
    }

    /// Quantity times limit price, for limit orders.
    ///
    /// `None` for market orders and when the product does not fit in a
    /// `Decimal`.
    #[must_use]
    pub fn notional(&self) -> Option<Decimal> {
        self.price
            .and_then(|p| p.amount().checked_mul(self.quantity.amount()))
    }

    /// Whether this limit order's notional is above `limit`.
    ///
    /// A notional too large to represent is above any limit. Market orders
    /// never exceed.
    #[must_use]
    pub fn exceeds_notional(&self, limit: Decimal) -> bool {
        self.price.is_some_and(|p| {
            p.amount()
                .checked_mul(self.quantity.amount())
                .is_none_or(|notional| notional > limit)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(price: Option<Decimal>) -> Order {
        Order::new(
            ClientId::anonymous(),
            OrderSide::Buy,
            Symbol::parse("AAPL").unwrap(),
            Quantity::new(dec!(10)).unwrap(),
            price.map(|p| Price::new(p).unwrap()),
            ClientOrderId::parse("abc123").unwrap(),
        )
    }

    #[test]
    fn order_type_follows_price() {
        assert_eq!(order(None).order_type(), OrderType::Market);
        assert_eq!(order(Some(dec!(150))).order_type(), OrderType::Limit);
    }

    #[test]
    fn notional_only_for_limit_orders() {
        assert_eq!(order(None).notional(), None);
        assert_eq!(order(Some(dec!(150.5))).notional(), Some(dec!(1505.0)));
    }

    #[test]
    fn notional_overflow_is_none_and_exceeds_any_limit() {
        let huge = Order::new(
            ClientId::anonymous(),
            OrderSide::Buy,
            Symbol::parse("BTC").unwrap(),
            Quantity::new(dec!(10000000000000000000000)).unwrap(),
            Some(Price::new(dec!(10000000)).unwrap()),
            ClientOrderId::parse("big-1").unwrap(),
        );

        assert_eq!(huge.notional(), None);
        assert!(huge.exceeds_notional(Decimal::MAX));
    }

    #[test]
    fn exceeds_notional_compares_limit_orders_only() {
        assert!(!order(None).exceeds_notional(dec!(1)));
        assert!(order(Some(dec!(150))).exceeds_notional(dec!(1499.99)));
        assert!(!order(Some(dec!(150))).exceeds_notional(dec!(1500)));
    }

    #[test]
    fn dedup_key_combines_client_and_id() {
        let key = order(None).dedup_key();
        assert_eq!(key.client, ClientId::anonymous());
        assert_eq!(key.client_order_id.as_str(), "abc123");
    }

    #[test]
    fn serializes_camel_case_without_client() {
        let json = serde_json::to_value(order(None)).unwrap();
        assert_eq!(json["clientOrderId"], "abc123");
        assert_eq!(json["side"], "BUY");
        assert!(json.get("client").is_none());
        assert!(json.get("price").is_none());
    }
}
