//! Shared identifier types used across the catalog/ordering domain.
//!
//! Each aggregate gets its own UUID newtype so a `ProductId` can never be
//! passed where a `CategoryId` is expected.

mod types;

pub use types::{CartId, CategoryId, OrderId, ProductId, UserId};
