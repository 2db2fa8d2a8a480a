use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::category::Category;

/// Repository trait for categories
///
/// Implementations must enforce uniqueness of both name and slug and
/// report a violation as [`RepositoryError::Conflict`](super::RepositoryError::Conflict).
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category
    async fn create(&self, category: &Category) -> RepositoryResult<()>;

    /// Find a category by its slug
    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;

    /// The `limit` most liked categories, most liked first
    async fn top_by_likes(&self, limit: usize) -> RepositoryResult<Vec<Category>>;
}
