//! Storage collaborator contracts for the catalog domain.
//!
//! The orchestration layer consumes the [`CategoryStore`] and
//! [`ProductStore`] traits; how aggregates are actually persisted and
//! queried is out of scope and supplied by infrastructure. The in-memory
//! implementations here back the test suites and double as the
//! executable description of the contract: uniqueness backstops and the
//! optimistic version token on product saves.

mod category;
mod error;
mod page;
mod product;

pub use category::{CategoryStore, InMemoryCategoryStore};
pub use error::StoreError;
pub use page::{Page, PageRequest};
pub use product::{InMemoryProductStore, ProductStore};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
