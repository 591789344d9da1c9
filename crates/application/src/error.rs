//! Orchestration-level errors.

use domain::{CategoryError, DomainError, ErrorKind, ProductError};
use store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the orchestration services.
///
/// Everything here is a semantic rejection, not a transient failure;
/// nothing is retried automatically beyond the internal version-conflict
/// retry in stock adjustment.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The referenced aggregate is absent or not active.
    #[error("{resource} not found with id: {id}")]
    NotFound { resource: &'static str, id: Uuid },

    /// A category with this name already exists.
    #[error("Category already exists with name: {name}")]
    DuplicateCategoryName { name: String },

    /// A product with this name already exists in the category.
    #[error("Product '{name}' already exists in category '{category}'")]
    DuplicateProductName { name: String, category: String },

    /// The category still has active products and cannot be deleted.
    #[error("Cannot delete category '{name}': it has {active_products} active product(s)")]
    CategoryInUse { name: String, active_products: u64 },

    /// An aggregate rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplicationError {
    /// Returns the user-visible category of this error, for the
    /// transport layer to map onto its own status vocabulary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::NotFound { .. } => ErrorKind::NotFound,
            ApplicationError::DuplicateCategoryName { .. }
            | ApplicationError::DuplicateProductName { .. }
            | ApplicationError::CategoryInUse { .. } => ErrorKind::Conflict,
            ApplicationError::Domain(e) => e.kind(),
            ApplicationError::Store(e) => match e {
                StoreError::VersionConflict { .. } | StoreError::UniqueViolation { .. } => {
                    ErrorKind::Conflict
                }
                StoreError::MissingCategory(_) => ErrorKind::Internal,
            },
        }
    }
}

impl From<CategoryError> for ApplicationError {
    fn from(e: CategoryError) -> Self {
        ApplicationError::Domain(e.into())
    }
}

impl From<ProductError> for ApplicationError {
    fn from(e: ProductError) -> Self {
        ApplicationError::Domain(e.into())
    }
}
