//! Order aggregate, status state machine and domain events.

mod aggregate;
mod events;
mod status;

pub use aggregate::{Order, OrderItem};
pub use events::{OrderCreatedEvent, OrderEvent, OrderPaidEvent};
pub use status::OrderStatus;

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// An item quantity was not positive.
    #[error("Quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: u32 },

    /// The order was not in the status the operation requires.
    #[error("Invalid transition. Expected: {expected}, Current: {current}")]
    InvalidTransition {
        expected: OrderStatus,
        current: OrderStatus,
    },

    /// Cancellation was requested after the order shipped.
    #[error("Cannot cancel order in status: {current}")]
    CannotCancel { current: OrderStatus },

    /// Items cannot change once the order left its pending status.
    #[error("Cannot modify items of an order in status: {current}")]
    ItemsLocked { current: OrderStatus },
}
