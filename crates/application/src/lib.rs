//! Catalog orchestration layer.
//!
//! Combines the catalog aggregates with their stores to enforce the
//! rules no single aggregate can own: name-uniqueness scoping, safe
//! category deletion, stock-aware product lookup, and filtered paged
//! retrieval. Services load aggregates through the store contracts,
//! invoke aggregate methods, and persist the results; aggregates never
//! reach out to storage themselves.

mod category;
mod error;
mod filter;
mod product;

pub use category::CategoryService;
pub use error::ApplicationError;
pub use filter::ProductFilter;
pub use product::ProductService;
