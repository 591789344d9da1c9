//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its lifecycle.
///
/// Transitions:
/// ```text
/// Pending ──► PaymentProcessing ──► Paid ──► Shipped ──► Delivered
///    │               │                │
///    └───────────────┴────────────────┴──► Cancelled
/// ```
///
/// `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order is being assembled; items can still be added.
    #[default]
    Pending,

    /// Order was confirmed and payment is in flight.
    PaymentProcessing,

    /// Payment was captured.
    Paid,

    /// Order left the warehouse; cancellation is no longer possible.
    Shipped,

    /// Order reached the customer (terminal).
    Delivered,

    /// Order was cancelled (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if items can be appended in this status.
    pub fn can_modify_items(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, OrderStatus::Shipped | OrderStatus::Delivered)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Returns the status name as stored and logged.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::PaymentProcessing => "PAYMENT_PROCESSING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn only_pending_allows_item_changes() {
        assert!(OrderStatus::Pending.can_modify_items());
        assert!(!OrderStatus::PaymentProcessing.can_modify_items());
        assert!(!OrderStatus::Paid.can_modify_items());
        assert!(!OrderStatus::Shipped.can_modify_items());
        assert!(!OrderStatus::Delivered.can_modify_items());
        assert!(!OrderStatus::Cancelled.can_modify_items());
    }

    #[test]
    fn shipped_and_delivered_cannot_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::PaymentProcessing.can_cancel());
        assert!(OrderStatus::Paid.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn display_matches_stored_form() {
        assert_eq!(OrderStatus::PaymentProcessing.to_string(), "PAYMENT_PROCESSING");
        assert_eq!(OrderStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn serializes_in_stored_form() {
        let json = serde_json::to_string(&OrderStatus::PaymentProcessing).unwrap();
        assert_eq!(json, "\"PAYMENT_PROCESSING\"");
        let back: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderStatus::PaymentProcessing);
    }
}
