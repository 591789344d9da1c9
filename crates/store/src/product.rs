//! Product store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CategoryId, ProductId};
use domain::{Category, Money, Product};
use tokio::sync::RwLock;

use crate::{Page, PageRequest, Result, StoreError};

/// Persistence contract for products.
///
/// All lookup and listing queries see only active (non-deleted)
/// products; soft-deleted records are reachable solely through a save of
/// the loaded aggregate. Listing queries page in a deterministic order
/// (creation time, then id).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persists the product, returning the stored representation with
    /// its new version token.
    ///
    /// Fails with [`StoreError::VersionConflict`] when the product's
    /// token no longer matches the stored record.
    async fn save(&self, product: Product) -> Result<Product>;

    /// Looks an active product up by id.
    async fn find_active_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Looks an active product up together with its owning category.
    async fn find_active_by_id_with_category(
        &self,
        id: ProductId,
    ) -> Result<Option<(Product, Category)>>;

    /// Pages through every active product.
    async fn find_all_active(&self, page: PageRequest) -> Result<Page<Product>>;

    /// Pages through the active products of one category.
    async fn find_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Product>>;

    /// Pages through active products whose name contains the given
    /// substring, case-insensitively.
    async fn find_by_name_containing(&self, name: &str, page: PageRequest)
        -> Result<Page<Product>>;

    /// Pages through active products priced within the inclusive range.
    async fn find_by_price_range(
        &self,
        min: Money,
        max: Money,
        page: PageRequest,
    ) -> Result<Page<Product>>;

    /// Pages through one category's active products priced within the
    /// inclusive range.
    async fn find_by_category_and_price_range(
        &self,
        category_id: CategoryId,
        min: Money,
        max: Money,
        page: PageRequest,
    ) -> Result<Page<Product>>;

    /// Returns true if an active product with this name
    /// (case-insensitive) exists in the category.
    async fn exists_by_name_ci(&self, name: &str, category_id: CategoryId) -> Result<bool>;

    /// Counts the active products referencing the category. Computed on
    /// demand; never cached.
    async fn count_active_by_category(&self, category_id: CategoryId) -> Result<u64>;
}

/// In-memory product store used by tests.
///
/// Shares the category map of the [`InMemoryCategoryStore`] it was
/// created from, so the category join and the referential backstop see
/// the same data the category store does.
#[derive(Clone)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl InMemoryProductStore {
    /// Creates an empty product store joined to the given category
    /// store.
    pub fn with_categories(categories: &crate::InMemoryCategoryStore) -> Self {
        Self {
            products: Arc::default(),
            categories: categories.shared_map(),
        }
    }

    /// Returns the number of stored products, deleted ones included.
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    async fn collect_active(&self, mut predicate: impl FnMut(&Product) -> bool) -> Vec<Product> {
        self.products
            .read()
            .await
            .values()
            .filter(|p| p.is_active() && predicate(p))
            .cloned()
            .collect()
    }
}

fn paginate(mut products: Vec<Product>, page: PageRequest) -> Page<Product> {
    let total = products.len() as u64;
    products.sort_by_key(|p| (p.created_at(), p.id().as_uuid()));
    let items = products
        .into_iter()
        .skip(page.offset())
        .take(page.size())
        .collect();
    Page::new(items, page, total)
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn save(&self, product: Product) -> Result<Product> {
        // Referential backstop: the owning category must exist.
        if !self
            .categories
            .read()
            .await
            .contains_key(&product.category_id())
        {
            return Err(StoreError::MissingCategory(product.category_id()));
        }

        let mut products = self.products.write().await;

        // Unique (name, category) backstop over active products.
        let name_lower = product.name().to_lowercase();
        let duplicate = products.values().any(|p| {
            p.id() != product.id()
                && p.is_active()
                && p.category_id() == product.category_id()
                && p.name().to_lowercase() == name_lower
        });
        if duplicate && product.is_active() {
            return Err(StoreError::UniqueViolation {
                constraint: "products_name_category_key",
                value: product.name().to_string(),
            });
        }

        // Optimistic concurrency: token must match the stored record.
        if let Some(existing) = products.get(&product.id())
            && existing.version() != product.version()
        {
            return Err(StoreError::VersionConflict {
                expected: product.version(),
                actual: existing.version(),
            });
        }

        let mut stored = product;
        stored.set_version(stored.version() + 1);
        products.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_active_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self
            .products
            .read()
            .await
            .get(&id)
            .filter(|p| p.is_active())
            .cloned())
    }

    async fn find_active_by_id_with_category(
        &self,
        id: ProductId,
    ) -> Result<Option<(Product, Category)>> {
        let Some(product) = self.find_active_by_id(id).await? else {
            return Ok(None);
        };
        let category = self
            .categories
            .read()
            .await
            .get(&product.category_id())
            .cloned()
            .ok_or(StoreError::MissingCategory(product.category_id()))?;
        Ok(Some((product, category)))
    }

    async fn find_all_active(&self, page: PageRequest) -> Result<Page<Product>> {
        Ok(paginate(self.collect_active(|_| true).await, page))
    }

    async fn find_by_category(
        &self,
        category_id: CategoryId,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let matches = self
            .collect_active(|p| p.category_id() == category_id)
            .await;
        Ok(paginate(matches, page))
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let needle = name.to_lowercase();
        let matches = self
            .collect_active(|p| p.name().to_lowercase().contains(&needle))
            .await;
        Ok(paginate(matches, page))
    }

    async fn find_by_price_range(
        &self,
        min: Money,
        max: Money,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let matches = self
            .collect_active(|p| p.price() >= min && p.price() <= max)
            .await;
        Ok(paginate(matches, page))
    }

    async fn find_by_category_and_price_range(
        &self,
        category_id: CategoryId,
        min: Money,
        max: Money,
        page: PageRequest,
    ) -> Result<Page<Product>> {
        let matches = self
            .collect_active(|p| {
                p.category_id() == category_id && p.price() >= min && p.price() <= max
            })
            .await;
        Ok(paginate(matches, page))
    }

    async fn exists_by_name_ci(&self, name: &str, category_id: CategoryId) -> Result<bool> {
        let name_lower = name.trim().to_lowercase();
        Ok(self
            .products
            .read()
            .await
            .values()
            .any(|p| {
                p.is_active()
                    && p.category_id() == category_id
                    && p.name().to_lowercase() == name_lower
            }))
    }

    async fn count_active_by_category(&self, category_id: CategoryId) -> Result<u64> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.is_active() && p.category_id() == category_id)
            .count() as u64)
    }
}
