//! Product listing filter.

use common::CategoryId;
use domain::Money;

/// Orthogonal filters for the product listing.
///
/// Price bounds are inclusive and only take effect when both ends are
/// present. In the current contract only category and price compose;
/// the name filter is exclusive (see `ProductService::find_all`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Restrict to one category.
    pub category_id: Option<CategoryId>,

    /// Case-insensitive substring of the product name.
    pub name: Option<String>,

    /// Lower price bound, inclusive.
    pub min_price: Option<Money>,

    /// Upper price bound, inclusive.
    pub max_price: Option<Money>,
}

impl ProductFilter {
    /// No filtering at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_category_filter(&self) -> bool {
        self.category_id.is_some()
    }

    pub fn has_name_filter(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }

    /// Both bounds are required together.
    pub fn has_price_filter(&self) -> bool {
        self.min_price.is_some() && self.max_price.is_some()
    }
}
