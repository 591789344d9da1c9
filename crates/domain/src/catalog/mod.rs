//! Catalog aggregates: categories and the products that reference them.

mod category;
mod product;

pub use category::{Category, CategoryError};
pub use product::{Product, ProductError};
