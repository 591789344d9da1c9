//! Domain layer for the catalog/ordering system.
//!
//! This crate provides the aggregates and value objects that own the
//! business invariants:
//! - `Money` value object with fixed scale-2 arithmetic
//! - `Category` and `Product` catalog aggregates
//! - `Cart` with rolling expiration and quantity bounds
//! - `Order` with its status state machine and domain events
//!
//! Aggregates are pure in-memory state machines; they never talk to
//! storage or transport. Every mutating operation either fully applies
//! its effect or returns an error and leaves the aggregate unchanged.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{Category, CategoryError, Product, ProductError};
pub use error::{DomainError, ErrorKind};
pub use money::{Money, MoneyError};
pub use order::{
    Order, OrderCreatedEvent, OrderError, OrderEvent, OrderItem, OrderPaidEvent, OrderStatus,
};
