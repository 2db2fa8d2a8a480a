use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::slug::slugify;

/// Maximum length of a category name, in characters
pub const NAME_MAX_LENGTH: usize = 128;

/// A category groups pages under a unique, slug-addressable name
///
/// # Invariants
/// - Name is non-empty and at most 128 characters
/// - Slug is derived from the name and is never empty
/// - Counters start at zero and are never decremented
///
/// # Example
/// ```
/// use rango::domain::category::Category;
///
/// let category = Category::new("Other Frameworks").expect("valid category");
/// assert_eq!(category.slug(), "other-frameworks");
/// assert_eq!(category.likes(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    id: Uuid,
    name: String,
    slug: String,
    views: i32,
    likes: i32,
    #[serde(skip)]
    created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category from a submitted name
    ///
    /// # Returns
    /// * `Ok(Category)` - With a freshly derived slug and zeroed counters
    /// * `Err(String)` - If the name is empty, too long, or has no sluggable characters
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err("This field is required.".to_string());
        }

        if name.chars().count() > NAME_MAX_LENGTH {
            return Err(format!(
                "Ensure this value has at most {} characters.",
                NAME_MAX_LENGTH
            ));
        }

        let slug = slugify(&name);
        if slug.is_empty() {
            return Err("Name must contain at least one letter or digit.".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            slug,
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        })
    }

    /// Sets the initial counters
    ///
    /// Negative values are clamped to zero.
    pub fn with_counters(mut self, views: i32, likes: i32) -> Self {
        self.views = views.max(0);
        self.likes = likes.max(0);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn views(&self) -> i32 {
        self.views
    }

    pub fn likes(&self) -> i32 {
        self.likes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Category from persistence layer data
    ///
    /// Bypasses validation; only repository implementations should call this.
    pub fn from_persistence(
        id: Uuid,
        name: String,
        slug: String,
        views: i32,
        likes: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            views,
            likes,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_category_derives_slug() {
        let category = Category::new("Django").unwrap();

        assert_eq!(category.name(), "Django");
        assert_eq!(category.slug(), "django");
        assert_eq!(category.views(), 0);
        assert_eq!(category.likes(), 0);
    }

    #[test]
    fn create_category_trims_name() {
        let category = Category::new("  Python  ").unwrap();
        assert_eq!(category.name(), "Python");
    }

    #[test]
    fn create_category_with_empty_name_fails() {
        let result = Category::new("   ");
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn create_category_with_long_name_fails() {
        let result = Category::new("x".repeat(NAME_MAX_LENGTH + 1));
        assert!(result.unwrap_err().contains("at most 128"));
    }

    #[test]
    fn create_category_without_sluggable_characters_fails() {
        assert!(Category::new("???").is_err());
    }

    #[test]
    fn counters_are_clamped() {
        let category = Category::new("Python").unwrap().with_counters(-3, 64);
        assert_eq!(category.views(), 0);
        assert_eq!(category.likes(), 64);
    }

    #[test]
    fn context_serialization_omits_timestamps() {
        let category = Category::new("Django").unwrap();
        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(value["slug"], "django");
        assert!(value.get("created_at").is_none());
    }
}
