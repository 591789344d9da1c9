//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

use super::events::{OrderCreatedEvent, OrderPaidEvent};
use super::status::OrderStatus;
use super::OrderError;

/// A line in an order.
///
/// Name and unit price are snapshots taken when the line was appended;
/// the line is immutable afterwards and owned exclusively by its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    id: Uuid,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl OrderItem {
    fn new(
        product_id: ProductId,
        product_name: String,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            product_id,
            product_name,
            unit_price,
            quantity,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line subtotal: unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }
}

/// Order aggregate root.
///
/// Starts `Pending`; items can be appended only while pending and are
/// never removed. Transitions follow the [`OrderStatus`] machine, and
/// the transitions that matter to the outside world return their domain
/// event instead of buffering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    status: OrderStatus,
    items: Vec<OrderItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending order for a user.
    pub fn create(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            user_id,
            status: OrderStatus::Pending,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a line with the given catalog snapshots.
    ///
    /// Fails once the order has left `Pending`: confirmed, paid and
    /// cancelled orders are historical records.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> Result<(), OrderError> {
        if !self.status.can_modify_items() {
            return Err(OrderError::ItemsLocked {
                current: self.status,
            });
        }
        let item = OrderItem::new(product_id, product_name.to_string(), unit_price, quantity)?;
        self.items.push(item);
        self.touch();
        Ok(())
    }

    /// Sum of line subtotals.
    pub fn calculate_total(&self) -> Money {
        self.items
            .iter()
            .map(OrderItem::subtotal)
            .fold(Money::zero(), |acc, s| acc.add(s))
    }

    /// Confirms a pending order, moving it into payment processing.
    ///
    /// Returns the order-created event carrying the computed total.
    pub fn confirm(&mut self) -> Result<OrderCreatedEvent, OrderError> {
        self.ensure_status(OrderStatus::Pending)?;
        self.status = OrderStatus::PaymentProcessing;
        self.touch();
        Ok(OrderCreatedEvent {
            order_id: self.id,
            user_id: self.user_id,
            total_amount: self.calculate_total(),
            occurred_at: Utc::now(),
        })
    }

    /// Records a captured payment.
    pub fn mark_as_paid(&mut self) -> Result<OrderPaidEvent, OrderError> {
        self.ensure_status(OrderStatus::PaymentProcessing)?;
        self.status = OrderStatus::Paid;
        self.touch();
        Ok(OrderPaidEvent {
            order_id: self.id,
            user_id: self.user_id,
            occurred_at: Utc::now(),
        })
    }

    /// Records that the order left the warehouse.
    pub fn mark_as_shipped(&mut self) -> Result<(), OrderError> {
        self.ensure_status(OrderStatus::Paid)?;
        self.status = OrderStatus::Shipped;
        self.touch();
        Ok(())
    }

    /// Records delivery to the customer.
    pub fn mark_as_delivered(&mut self) -> Result<(), OrderError> {
        self.ensure_status(OrderStatus::Shipped)?;
        self.status = OrderStatus::Delivered;
        self.touch();
        Ok(())
    }

    /// Cancels the order. Possible from any status except `Shipped` and
    /// `Delivered`.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::CannotCancel {
                current: self.status,
            });
        }
        self.status = OrderStatus::Cancelled;
        self.touch();
        Ok(())
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn ensure_status(&self, expected: OrderStatus) -> Result<(), OrderError> {
        if self.status != expected {
            return Err(OrderError::InvalidTransition {
                expected,
                current: self.status,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
