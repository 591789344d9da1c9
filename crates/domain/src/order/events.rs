//! Order domain events.
//!
//! Events are pure return values of the transitions that produce them:
//! [`Order::confirm`](super::Order::confirm) returns the created event,
//! [`Order::mark_as_paid`](super::Order::mark_as_paid) the paid event.
//! The core guarantees only that the events existed; handing them to a
//! dispatcher after the owning transaction commits is the caller's job.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Emitted when a pending order is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    /// The confirmed order.
    pub order_id: OrderId,

    /// The user who placed it.
    pub user_id: UserId,

    /// Order total at confirmation time.
    pub total_amount: Money,

    /// When the confirmation happened.
    pub occurred_at: DateTime<Utc>,
}

/// Emitted when payment is captured for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    /// The paid order.
    pub order_id: OrderId,

    /// The user who placed it.
    pub user_id: UserId,

    /// When the payment was captured.
    pub occurred_at: DateTime<Utc>,
}

/// Dispatcher-facing union of the order events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was confirmed.
    Created(OrderCreatedEvent),

    /// Order was paid.
    Paid(OrderPaidEvent),
}

impl OrderEvent {
    /// Returns the event type tag used for routing and logging.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created(_) => "OrderCreated",
            OrderEvent::Paid(_) => "OrderPaid",
        }
    }
}

impl From<OrderCreatedEvent> for OrderEvent {
    fn from(event: OrderCreatedEvent) -> Self {
        OrderEvent::Created(event)
    }
}

impl From<OrderPaidEvent> for OrderEvent {
    fn from(event: OrderPaidEvent) -> Self {
        OrderEvent::Paid(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tags() {
        let created = OrderEvent::from(OrderCreatedEvent {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            total_amount: Money::zero(),
            occurred_at: Utc::now(),
        });
        assert_eq!(created.event_type(), "OrderCreated");

        let paid = OrderEvent::from(OrderPaidEvent {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            occurred_at: Utc::now(),
        });
        assert_eq!(paid.event_type(), "OrderPaid");
    }

    #[test]
    fn serialization_roundtrip() {
        let event = OrderEvent::from(OrderCreatedEvent {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            total_amount: "3199.79".parse().unwrap(),
            occurred_at: Utc::now(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Created\""));
        let back: OrderEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
