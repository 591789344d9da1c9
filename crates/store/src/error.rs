use common::CategoryId;
use thiserror::Error;

/// Errors that can occur when interacting with a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The optimistic-concurrency token on a product save did not match
    /// the stored record; the caller must reload and retry.
    #[error("Version conflict: expected version {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    /// A uniqueness constraint rejected the write. This is the backstop
    /// behind the orchestration layer's check-then-act fast paths.
    #[error("Unique constraint {constraint} violated by value: {value}")]
    UniqueViolation {
        constraint: &'static str,
        value: String,
    },

    /// A product was saved against a category that does not exist.
    #[error("Referenced category does not exist: {0}")]
    MissingCategory(CategoryId),
}
