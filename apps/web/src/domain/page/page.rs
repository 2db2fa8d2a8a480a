use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::domain::category::Category;

/// Maximum length of a page title, in characters
pub const TITLE_MAX_LENGTH: usize = 128;

/// Maximum length of a page URL, in characters
pub const URL_MAX_LENGTH: usize = 200;

/// A page is an external link filed under exactly one category
///
/// # Invariants
/// - Always references a category that existed when it was created
/// - A new page starts with zero views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    id: Uuid,
    category_id: Uuid,
    title: String,
    url: String,
    views: i32,
    #[serde(skip)]
    created_at: DateTime<Utc>,
}

impl Page {
    /// Creates a new page belonging to `category`
    ///
    /// The page's views counter is always initialized to zero, whatever
    /// the caller submitted.
    ///
    /// # Example
    /// ```
    /// use rango::domain::category::Category;
    /// use rango::domain::page::Page;
    /// use url::Url;
    ///
    /// let category = Category::new("Python").unwrap();
    /// let url = Url::parse("https://docs.python.org/3/tutorial/").unwrap();
    /// let page = Page::new(&category, "Official Tutorial", url);
    ///
    /// assert_eq!(page.category_id(), category.id());
    /// assert_eq!(page.views(), 0);
    /// ```
    pub fn new(category: &Category, title: impl Into<String>, url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id: category.id(),
            title: title.into(),
            url: url.into(),
            views: 0,
            created_at: Utc::now(),
        }
    }

    /// Sets the views counter, clamped to zero
    pub fn with_views(mut self, views: i32) -> Self {
        self.views = views.max(0);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn views(&self) -> i32 {
        self.views
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Page from persistence layer data
    pub fn from_persistence(
        id: Uuid,
        category_id: Uuid,
        title: String,
        url: String,
        views: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            category_id,
            title,
            url,
            views,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python() -> Category {
        Category::new("Python").unwrap()
    }

    #[test]
    fn new_page_starts_with_zero_views() {
        let category = python();
        let page = Page::new(
            &category,
            "Learn Python in 10 Minutes",
            Url::parse("https://www.stavros.io/tutorials/python/").unwrap(),
        );

        assert_eq!(page.views(), 0);
        assert_eq!(page.category_id(), category.id());
        assert_eq!(page.title(), "Learn Python in 10 Minutes");
        assert_eq!(page.url(), "https://www.stavros.io/tutorials/python/");
    }

    #[test]
    fn views_are_clamped() {
        let page = Page::new(&python(), "Docs", Url::parse("http://docs.python.org").unwrap())
            .with_views(-1);
        assert_eq!(page.views(), 0);
    }
}
