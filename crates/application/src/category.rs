//! Category orchestration service.

use common::CategoryId;
use domain::Category;
use store::{CategoryStore, ProductStore};
use tracing::{debug, info};

use crate::error::ApplicationError;

/// Service for managing categories.
///
/// Owns the cross-aggregate rules a single category cannot enforce:
/// name uniqueness across all categories, and the deletion guard
/// against categories that still have active products.
#[derive(Clone)]
pub struct CategoryService<C, P> {
    categories: C,
    products: P,
}

impl<C, P> CategoryService<C, P>
where
    C: CategoryStore,
    P: ProductStore,
{
    /// Creates a service over the given stores.
    pub fn new(categories: C, products: P) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Creates a new category, rejecting duplicate names.
    #[tracing::instrument(skip(self, description))]
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, ApplicationError> {
        debug!("Creating category");

        if self.categories.exists_by_name(name).await? {
            return Err(ApplicationError::DuplicateCategoryName {
                name: name.to_string(),
            });
        }

        let category = Category::create(name, description)?;
        let saved = self.categories.save(category).await?;

        info!(id = %saved.id(), name = saved.name(), "Category created");
        Ok(saved)
    }

    /// Loads a category by id.
    pub async fn find_by_id(&self, id: CategoryId) -> Result<Category, ApplicationError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound {
                resource: "Category",
                id: id.as_uuid(),
            })
    }

    /// Returns all categories ordered by name.
    pub async fn find_all(&self) -> Result<Vec<Category>, ApplicationError> {
        Ok(self.categories.list_all_ordered_by_name().await?)
    }

    /// Renames a category and replaces its description.
    ///
    /// A rename to the same name (compared case-insensitively) skips the
    /// uniqueness check entirely, so description-only updates never
    /// false-positive against the category itself.
    #[tracing::instrument(skip(self, new_description))]
    pub async fn update(
        &self,
        id: CategoryId,
        new_name: &str,
        new_description: Option<&str>,
    ) -> Result<Category, ApplicationError> {
        debug!("Updating category");

        let mut category = self.find_by_id(id).await?;

        let name_changed =
            category.name().to_lowercase() != new_name.trim().to_lowercase();
        if name_changed && self.categories.exists_by_name(new_name).await? {
            return Err(ApplicationError::DuplicateCategoryName {
                name: new_name.to_string(),
            });
        }

        category.update(new_name, new_description)?;
        let updated = self.categories.save(category).await?;

        info!(id = %updated.id(), name = updated.name(), "Category updated");
        Ok(updated)
    }

    /// Deletes a category, guarding against active products.
    ///
    /// The active-product count is computed at deletion time; there is
    /// no cached counter to go stale.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), ApplicationError> {
        debug!("Deleting category");

        let category = self.find_by_id(id).await?;

        let active_products = self.products.count_active_by_category(id).await?;
        if active_products > 0 {
            return Err(ApplicationError::CategoryInUse {
                name: category.name().to_string(),
                active_products,
            });
        }

        self.categories.delete(id).await?;
        info!(%id, name = category.name(), "Category deleted");
        Ok(())
    }
}
