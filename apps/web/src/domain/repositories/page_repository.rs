use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::page::Page;

/// Repository trait for pages
#[async_trait]
pub trait PageRepository: Send + Sync {
    /// Insert a new page; its category must exist
    async fn create(&self, page: &Page) -> RepositoryResult<()>;

    /// All pages of a category, in insertion order
    async fn find_by_category(&self, category_id: Uuid) -> RepositoryResult<Vec<Page>>;

    /// The `limit` most viewed pages, most viewed first
    async fn top_by_views(&self, limit: usize) -> RepositoryResult<Vec<Page>>;
}
