//! Shopping cart aggregate with rolling expiration.

use chrono::{DateTime, Duration, Utc};
use common::{CartId, ProductId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::money::Money;

/// Minimum quantity of a single cart line.
pub const QUANTITY_MIN: u32 = 1;

/// Maximum quantity of a single cart line.
pub const QUANTITY_MAX: u32 = 99;

/// Rolling time-to-live of a cart, measured from its last mutation.
pub const TTL_DAYS: i64 = 7;

/// Errors that can occur when mutating a cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity was outside `[QUANTITY_MIN, QUANTITY_MAX]`.
    #[error("Quantity must be between {QUANTITY_MIN} and {QUANTITY_MAX}, got {quantity}")]
    QuantityOutOfRange { quantity: u32 },
}

/// A line in a cart.
///
/// Product name and unit price are point-in-time snapshots taken when
/// the line was added; later catalog edits do not flow back into them.
/// Items are owned exclusively by their cart and constructed only
/// through [`Cart::add_or_update_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    id: Uuid,
    product_id: ProductId,
    product_name: String,
    unit_price: Money,
    quantity: u32,
}

impl CartItem {
    fn new(product_id: ProductId, product_name: String, unit_price: Money, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            product_name,
            unit_price,
            quantity,
        }
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

/// A per-user mutable collection of cart lines.
///
/// Invariants: at most one line per product id; every quantity within
/// `[1, 99]`; `expires_at` slides forward by [`TTL_DAYS`] on every
/// addition or quantity change. Expiry is advisory: the aggregate never
/// self-destructs, callers check [`Cart::is_expired`] and discard or
/// recreate stale carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    user_id: UserId,
    items: Vec<CartItem>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn create(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(),
            user_id,
            items: Vec::new(),
            updated_at: now,
            expires_at: now + Duration::days(TTL_DAYS),
        }
    }

    /// Adds a line for the product, or replaces the quantity of an
    /// existing line (replacement, not accumulation).
    ///
    /// Slides the expiration window forward from now.
    pub fn add_or_update_item(
        &mut self,
        product_id: ProductId,
        product_name: &str,
        unit_price: Money,
        quantity: u32,
    ) -> Result<(), CartError> {
        if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&quantity) {
            return Err(CartError::QuantityOutOfRange { quantity });
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity = quantity,
            None => self.items.push(CartItem::new(
                product_id,
                product_name.to_string(),
                unit_price,
                quantity,
            )),
        }

        self.touch();
        self.refresh_expiration();
        Ok(())
    }

    /// Removes the line for the product, if present.
    ///
    /// Deliberately does not refresh the expiration window; only
    /// additions keep a cart alive.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product_id != product_id);
        self.touch();
    }

    /// Drops all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Sum of line subtotals.
    pub fn calculate_total(&self) -> Money {
        self.items
            .iter()
            .map(CartItem::subtotal)
            .fold(Money::zero(), |acc, s| acc.add(s))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pure comparison against the expiration instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the cart has outlived its rolling TTL.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    fn refresh_expiration(&mut self) {
        self.expires_at = Utc::now() + Duration::days(TTL_DAYS);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
