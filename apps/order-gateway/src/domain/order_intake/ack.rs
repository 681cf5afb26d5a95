//! Order acknowledgment.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ClientOrderId, OrderId, ReceiptId};

/// Terminal status of a routed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    /// The execution backend received the order.
    Accepted,
    /// The execution backend refused the order.
    Rejected,
}

/// Acknowledgment returned to the client for one routed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    /// Gateway-generated order ID.
    pub order_id: OrderId,
    /// Echo of the client's idempotency key.
    pub client_order_id: ClientOrderId,
    /// Accepted or rejected.
    pub status: AckStatus,
    /// Rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Backend receipt, present when accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<ReceiptId>,
}

impl OrderAck {
    /// Acknowledge an accepted order.
    #[must_use]
    pub const fn accepted(
        order_id: OrderId,
        client_order_id: ClientOrderId,
        receipt_id: ReceiptId,
    ) -> Self {
        Self {
            order_id,
            client_order_id,
            status: AckStatus::Accepted,
            reason: None,
            receipt_id: Some(receipt_id),
        }
    }

    /// Acknowledge a rejected order.
    #[must_use]
    pub fn rejected(
        order_id: OrderId,
        client_order_id: ClientOrderId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            client_order_id,
            status: AckStatus::Rejected,
            reason: Some(reason.into()),
            receipt_id: None,
        }
    }

    /// Returns true if the order was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self.status, AckStatus::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_ack_serializes_without_reason() {
        let ack = OrderAck::accepted(
            OrderId::new("ord-1"),
            ClientOrderId::new("abc123"),
            ReceiptId::new("rcpt-1"),
        );
        let json = serde_json::to_value(&ack).unwrap();

        assert_eq!(json["orderId"], "ord-1");
        assert_eq!(json["status"], "Accepted");
        assert_eq!(json["receiptId"], "rcpt-1");
        assert!(json.get("reason").is_none());
        assert!(ack.is_accepted());
    }

    #[test]
    fn rejected_ack_carries_reason() {
        let ack = OrderAck::rejected(
            OrderId::new("ord-2"),
            ClientOrderId::new("abc124"),
            "insufficient funds",
        );
        let json = serde_json::to_value(&ack).unwrap();

        assert_eq!(json["status"], "Rejected");
        assert_eq!(json["reason"], "insufficient funds");
        assert!(json.get("receiptId").is_none());
        assert!(!ack.is_accepted());
    }
}
