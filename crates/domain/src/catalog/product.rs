//! Product aggregate.

use chrono::{DateTime, Utc};
use common::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Money;

/// Maximum length of a product name, in characters.
pub const NAME_MAX: usize = 200;

/// Maximum length of a product description, in characters.
pub const DESCRIPTION_MAX: usize = 2000;

/// Errors that can occur when creating or mutating a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The name was empty or whitespace-only.
    #[error("Product name cannot be blank")]
    BlankName,

    /// The trimmed name exceeded [`NAME_MAX`] characters.
    #[error("Product name cannot exceed {NAME_MAX} characters")]
    NameTooLong,

    /// The description exceeded [`DESCRIPTION_MAX`] characters.
    #[error("Product description cannot exceed {DESCRIPTION_MAX} characters")]
    DescriptionTooLong,

    /// A stock adjustment would drive the quantity below zero.
    #[error("Insufficient stock. Available: {available}, Requested: {requested}")]
    InsufficientStock { available: u32, requested: u32 },

    /// A stock adjustment would overflow the stock counter.
    #[error("Stock adjustment overflows. Available: {available}, Requested: {requested}")]
    StockOverflow { available: u32, requested: u32 },
}

/// A priced, stocked, categorized, soft-deletable catalog entry.
///
/// Stock can never go negative: the field is unsigned and the single
/// mutation entry point, [`Product::adjust_stock`], rejects any delta
/// that would underflow. Deletion is a soft tombstone; the record keeps
/// existing so historical order/cart snapshots stay resolvable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Money,
    stock_quantity: u32,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    version: u64,
}

impl Product {
    /// Creates a new product in the given category.
    pub fn create(
        name: &str,
        description: Option<&str>,
        price: Money,
        stock_quantity: u32,
        category_id: CategoryId,
    ) -> Result<Self, ProductError> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            name,
            description,
            price,
            stock_quantity,
            category_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            version: 0,
        })
    }

    /// Replaces name, description and price. Category and stock are not
    /// touched by this operation.
    pub fn update_details(
        &mut self,
        name: &str,
        description: Option<&str>,
        price: Money,
    ) -> Result<(), ProductError> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        self.name = name;
        self.description = description;
        self.price = price;
        self.touch();
        Ok(())
    }

    /// Applies a signed stock delta.
    ///
    /// Fails when `stock + delta` leaves `[0, u32::MAX]`, with the stock
    /// unchanged. On success the new stock is exactly `stock + delta`.
    pub fn adjust_stock(&mut self, delta: i32) -> Result<(), ProductError> {
        let new_stock = i64::from(self.stock_quantity) + i64::from(delta);
        if new_stock < 0 {
            return Err(ProductError::InsufficientStock {
                available: self.stock_quantity,
                requested: delta.unsigned_abs(),
            });
        }
        self.stock_quantity =
            u32::try_from(new_stock).map_err(|_| ProductError::StockOverflow {
                available: self.stock_quantity,
                requested: delta.unsigned_abs(),
            })?;
        self.touch();
        Ok(())
    }

    /// Marks the product as deleted.
    ///
    /// Idempotent in visible effect: the original deletion timestamp is
    /// kept on repeated calls, but each call bumps `updated_at`.
    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
        self.touch();
    }

    /// Not deleted and in stock.
    pub fn is_available(&self) -> bool {
        self.deleted_at.is_none() && self.stock_quantity > 0
    }

    /// Not deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Optimistic-concurrency token, managed by the store on save.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the concurrency token. Called by the store after a
    /// successful save; not part of the domain API.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<String, ProductError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProductError::BlankName);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(ProductError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: Option<&str>) -> Result<Option<String>, ProductError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX => Err(ProductError::DescriptionTooLong),
        Some(d) => Ok(Some(d.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn notebook() -> Product {
        Product::create(
            "Notebook",
            Some("15 inch"),
            money("2999.99"),
            10,
            CategoryId::new(),
        )
        .unwrap()
    }

    #[test]
    fn creates_with_trimmed_name() {
        let product = Product::create(
            "  Mouse ",
            None,
            money("99.90"),
            20,
            CategoryId::new(),
        )
        .unwrap();
        assert_eq!(product.name(), "Mouse");
        assert_eq!(product.stock_quantity(), 20);
        assert!(product.is_active());
    }

    #[test]
    fn rejects_blank_name() {
        let result = Product::create(" ", None, money("1.00"), 0, CategoryId::new());
        assert_eq!(result, Err(ProductError::BlankName));
    }

    #[test]
    fn adjust_stock_applies_delta_exactly() {
        let mut product = notebook();
        product.adjust_stock(-3).unwrap();
        assert_eq!(product.stock_quantity(), 7);
        product.adjust_stock(5).unwrap();
        assert_eq!(product.stock_quantity(), 12);
    }

    #[test]
    fn adjust_stock_fails_below_zero_and_leaves_stock_unchanged() {
        let mut product = notebook();
        product.adjust_stock(-3).unwrap();

        let err = product.adjust_stock(-10).unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                available: 7,
                requested: 10,
            }
        );
        assert!(err.to_string().contains("Insufficient stock"));
        assert_eq!(product.stock_quantity(), 7);
    }

    #[test]
    fn adjust_stock_fails_above_counter_range_and_leaves_stock_unchanged() {
        let mut product =
            Product::create("Bulk", None, money("1.00"), u32::MAX - 1, CategoryId::new())
                .unwrap();

        let err = product.adjust_stock(2).unwrap_err();
        assert_eq!(
            err,
            ProductError::StockOverflow {
                available: u32::MAX - 1,
                requested: 2,
            }
        );
        assert_eq!(product.stock_quantity(), u32::MAX - 1);

        // The last representable unit is still reachable.
        product.adjust_stock(1).unwrap();
        assert_eq!(product.stock_quantity(), u32::MAX);
    }

    #[test]
    fn adjust_stock_to_exactly_zero_succeeds() {
        let mut product = notebook();
        product.adjust_stock(-10).unwrap();
        assert_eq!(product.stock_quantity(), 0);
        assert!(!product.is_available());
        assert!(product.is_active());
    }

    #[test]
    fn availability_requires_stock_and_not_deleted() {
        let mut product = notebook();
        assert!(product.is_available());
        product.soft_delete();
        assert!(!product.is_available());
    }

    #[test]
    fn soft_delete_is_monotone() {
        let mut product = notebook();
        product.soft_delete();
        let deleted_at = product.deleted_at().unwrap();

        product.adjust_stock(5).unwrap();
        product
            .update_details("Notebook Pro", None, money("3499.00"))
            .unwrap();
        assert!(!product.is_active());

        product.soft_delete();
        assert_eq!(product.deleted_at(), Some(deleted_at));
    }

    #[test]
    fn update_details_keeps_category_and_stock() {
        let mut product = notebook();
        let category_id = product.category_id();

        product
            .update_details("Notebook Pro", Some("17 inch"), money("3499.00"))
            .unwrap();

        assert_eq!(product.name(), "Notebook Pro");
        assert_eq!(product.price(), money("3499.00"));
        assert_eq!(product.category_id(), category_id);
        assert_eq!(product.stock_quantity(), 10);
    }

    #[test]
    fn update_details_rejects_blank_name_without_mutating() {
        let mut product = notebook();
        let result = product.update_details("", None, money("1.00"));
        assert_eq!(result, Err(ProductError::BlankName));
        assert_eq!(product.name(), "Notebook");
        assert_eq!(product.price(), money("2999.99"));
    }
}
