//! Category aggregate.

use chrono::{DateTime, Utc};
use common::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a category name, in characters.
pub const NAME_MAX: usize = 100;

/// Maximum length of a category description, in characters.
pub const DESCRIPTION_MAX: usize = 500;

/// Errors that can occur when creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// The name was empty or whitespace-only.
    #[error("Category name cannot be blank")]
    BlankName,

    /// The trimmed name exceeded [`NAME_MAX`] characters.
    #[error("Category name cannot exceed {NAME_MAX} characters")]
    NameTooLong,

    /// The description exceeded [`DESCRIPTION_MAX`] characters.
    #[error("Category description cannot exceed {DESCRIPTION_MAX} characters")]
    DescriptionTooLong,
}

/// A named grouping of products.
///
/// Name uniqueness across categories is a cross-aggregate rule enforced
/// by the orchestration layer; this aggregate only owns the local
/// invariants (non-blank trimmed name, length bounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category with a trimmed, validated name.
    pub fn create(
        name: &str,
        description: Option<&str>,
    ) -> Result<Self, CategoryError> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        let now = Utc::now();
        Ok(Self {
            id: CategoryId::new(),
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames the category and replaces its description.
    ///
    /// Re-validates exactly as [`Category::create`] and always bumps the
    /// modification timestamp.
    pub fn update(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), CategoryError> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        self.name = name;
        self.description = description;
        self.touch();
        Ok(())
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<String, CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::BlankName);
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(CategoryError::NameTooLong);
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: Option<&str>) -> Result<Option<String>, CategoryError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX => Err(CategoryError::DescriptionTooLong),
        Some(d) => Ok(Some(d.to_string())),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_with_trimmed_name() {
        let category = Category::create("  Electronics  ", Some("Devices")).unwrap();
        assert_eq!(category.name(), "Electronics");
        assert_eq!(category.description(), Some("Devices"));
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(Category::create("   ", None), Err(CategoryError::BlankName));
        assert_eq!(Category::create("", None), Err(CategoryError::BlankName));
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(NAME_MAX + 1);
        assert_eq!(Category::create(&name, None), Err(CategoryError::NameTooLong));
    }

    #[test]
    fn rejects_overlong_description() {
        let description = "x".repeat(DESCRIPTION_MAX + 1);
        assert_eq!(
            Category::create("Books", Some(&description)),
            Err(CategoryError::DescriptionTooLong)
        );
    }

    #[test]
    fn update_revalidates_and_trims() {
        let mut category = Category::create("Books", None).unwrap();
        category.update("  Comics ", Some("Graphic novels")).unwrap();
        assert_eq!(category.name(), "Comics");

        assert_eq!(category.update("  ", None), Err(CategoryError::BlankName));
        // Failed update leaves the aggregate unchanged.
        assert_eq!(category.name(), "Comics");

        // A valid name alongside an invalid description must not take
        // effect either.
        let overlong = "x".repeat(DESCRIPTION_MAX + 1);
        assert_eq!(
            category.update("Manga", Some(&overlong)),
            Err(CategoryError::DescriptionTooLong)
        );
        assert_eq!(category.name(), "Comics");
        assert_eq!(category.description(), Some("Graphic novels"));
    }

    #[test]
    fn update_can_clear_description() {
        let mut category = Category::create("Books", Some("Old")).unwrap();
        category.update("Books", None).unwrap();
        assert_eq!(category.description(), None);
    }

    #[test]
    fn update_bumps_modification_timestamp() {
        let mut category = Category::create("Books", None).unwrap();
        let before = category.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        category.update("Books", Some("desc")).unwrap();
        assert!(category.updated_at() > before);
    }
}
