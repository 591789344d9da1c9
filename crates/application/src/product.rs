//! Product orchestration service.

use common::{CategoryId, ProductId};
use domain::{Category, Money, Product};
use store::{CategoryStore, Page, PageRequest, ProductStore, StoreError};
use tracing::{debug, info};

use crate::error::ApplicationError;
use crate::filter::ProductFilter;

/// Bounded retries for the optimistic stock-adjustment write.
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Service for managing products.
///
/// Owns the cross-aggregate rules: case-insensitive (name, category)
/// uniqueness, stock-aware lookup of active products only, and the
/// filtered paged listing dispatch.
#[derive(Clone)]
pub struct ProductService<P, C> {
    products: P,
    categories: C,
}

impl<P, C> ProductService<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    /// Creates a service over the given stores.
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Creates a new product in an existing category.
    #[tracing::instrument(skip(self, description, price))]
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        price: Money,
        stock_quantity: u32,
        category_id: CategoryId,
    ) -> Result<Product, ApplicationError> {
        debug!("Creating product");

        let category = self.require_category(category_id).await?;

        if self.products.exists_by_name_ci(name, category_id).await? {
            return Err(ApplicationError::DuplicateProductName {
                name: name.trim().to_string(),
                category: category.name().to_string(),
            });
        }

        let product = Product::create(name, description, price, stock_quantity, category_id)?;
        let saved = self.products.save(product).await?;

        info!(id = %saved.id(), name = saved.name(), "Product created");
        Ok(saved)
    }

    /// Loads an active product by id.
    pub async fn find_by_id(&self, id: ProductId) -> Result<Product, ApplicationError> {
        self.products
            .find_active_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound {
                resource: "Product",
                id: id.as_uuid(),
            })
    }

    /// Lists active products through the filter dispatch.
    ///
    /// Only category and price compose; the name filter is exclusive.
    /// This mirrors the current query contract and is a documented
    /// limitation, not an accident.
    pub async fn find_all(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<Product>, ApplicationError> {
        // Combined filter: category + price.
        if let (Some(category_id), Some(min), Some(max), false) = (
            filter.category_id,
            filter.min_price,
            filter.max_price,
            filter.has_name_filter(),
        ) {
            return Ok(self
                .products
                .find_by_category_and_price_range(category_id, min, max, page)
                .await?);
        }

        // Category only.
        if let Some(category_id) = filter.category_id {
            return Ok(self.products.find_by_category(category_id, page).await?);
        }

        // Name only.
        if filter.has_name_filter() {
            let name = filter.name.as_deref().unwrap_or_default();
            return Ok(self.products.find_by_name_containing(name, page).await?);
        }

        // Price only.
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            return Ok(self.products.find_by_price_range(min, max, page).await?);
        }

        // No filter.
        Ok(self.products.find_all_active(page).await?)
    }

    /// Updates name, description and price of an active product.
    ///
    /// Uniqueness is re-checked only when name (case-insensitively) or
    /// category actually changed, so an idempotent save never conflicts
    /// with the product itself.
    #[tracing::instrument(skip(self, description, price))]
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        description: Option<&str>,
        price: Money,
        category_id: CategoryId,
    ) -> Result<Product, ApplicationError> {
        debug!("Updating product");

        let (mut product, _current_category) = self
            .products
            .find_active_by_id_with_category(id)
            .await?
            .ok_or(ApplicationError::NotFound {
                resource: "Product",
                id: id.as_uuid(),
            })?;

        let category = self.require_category(category_id).await?;

        let name_or_category_changed = product.name().to_lowercase()
            != name.trim().to_lowercase()
            || product.category_id() != category_id;

        if name_or_category_changed
            && self.products.exists_by_name_ci(name, category_id).await?
        {
            return Err(ApplicationError::DuplicateProductName {
                name: name.trim().to_string(),
                category: category.name().to_string(),
            });
        }

        product.update_details(name, description, price)?;
        let updated = self.products.save(product).await?;

        info!(id = %updated.id(), name = updated.name(), "Product updated");
        Ok(updated)
    }

    /// Applies a signed stock delta to an active product.
    ///
    /// Deleted products fail with NotFound rather than silently
    /// succeeding. A version conflict on save means another adjustment
    /// won the race; the whole read-modify-write is retried so that the
    /// second adjustment observes the first one's result.
    #[tracing::instrument(skip(self))]
    pub async fn adjust_stock(
        &self,
        id: ProductId,
        delta: i32,
    ) -> Result<Product, ApplicationError> {
        debug!("Adjusting stock");

        let mut attempts = 0;
        loop {
            attempts += 1;

            let mut product = self.find_by_id(id).await?;
            product.adjust_stock(delta)?;

            match self.products.save(product).await {
                Ok(saved) => {
                    info!(id = %saved.id(), new_stock = saved.stock_quantity(), "Stock adjusted");
                    return Ok(saved);
                }
                Err(StoreError::VersionConflict { .. }) if attempts < MAX_SAVE_ATTEMPTS => {
                    debug!(attempts, "Stock adjustment lost the race, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Soft-deletes an active product.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApplicationError> {
        debug!("Soft deleting product");

        let mut product = self.find_by_id(id).await?;
        product.soft_delete();
        self.products.save(product).await?;

        info!(%id, "Product soft deleted");
        Ok(())
    }

    async fn require_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Category, ApplicationError> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(ApplicationError::NotFound {
                resource: "Category",
                id: category_id.as_uuid(),
            })
    }
}
