//! Category store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::CategoryId;
use domain::Category;
use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Persistence contract for categories.
///
/// Implementations operate inside an externally managed transaction
/// boundary; the orchestration layer opens one per logical operation.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Persists the category, returning the stored representation.
    async fn save(&self, category: Category) -> Result<Category>;

    /// Looks a category up by id.
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>>;

    /// Returns true if a category with exactly this name exists.
    async fn exists_by_name(&self, name: &str) -> Result<bool>;

    /// Returns every category, ordered by name.
    async fn list_all_ordered_by_name(&self) -> Result<Vec<Category>>;

    /// Removes the category. Absent ids are a no-op.
    async fn delete(&self, id: CategoryId) -> Result<()>;
}

/// In-memory category store used by tests.
///
/// Cloned handles share the same underlying map, so a clone given to a
/// service observes the same data as the original.
#[derive(Clone, Default)]
pub struct InMemoryCategoryStore {
    categories: Arc<RwLock<HashMap<CategoryId, Category>>>,
}

impl InMemoryCategoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shared_map(&self) -> Arc<RwLock<HashMap<CategoryId, Category>>> {
        Arc::clone(&self.categories)
    }

    /// Returns the number of stored categories.
    pub async fn count(&self) -> usize {
        self.categories.read().await.len()
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn save(&self, category: Category) -> Result<Category> {
        let mut categories = self.categories.write().await;

        // Unique name backstop, mirroring the database constraint.
        let duplicate = categories
            .values()
            .any(|c| c.id() != category.id() && c.name() == category.name());
        if duplicate {
            return Err(StoreError::UniqueViolation {
                constraint: "categories_name_key",
                value: category.name().to_string(),
            });
        }

        categories.insert(category.id(), category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .any(|c| c.name() == name))
    }

    async fn list_all_ordered_by_name(&self) -> Result<Vec<Category>> {
        let mut all: Vec<_> = self.categories.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }

    async fn delete(&self, id: CategoryId) -> Result<()> {
        self.categories.write().await.remove(&id);
        Ok(())
    }
}
