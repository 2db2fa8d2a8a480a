use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::postgres_errors::write_error;
use crate::domain::category::Category;
use crate::domain::repositories::{CategoryRepository, RepositoryResult};

/// PostgreSQL implementation of CategoryRepository
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new PostgresCategoryRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    slug: String,
    views: i32,
    likes: i32,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::from_persistence(r.id, r.name, r.slug, r.views, r.likes, r.created_at)
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &Category) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, slug, views, likes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id())
        .bind(category.name())
        .bind(category.slug())
        .bind(category.views())
        .bind(category.likes())
        .bind(category.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            write_error(e, category.name(), |constraint| {
                if constraint.contains("slug") {
                    "slug"
                } else {
                    "name"
                }
            })
        })?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, views, likes, created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    async fn top_by_likes(&self, limit: usize) -> RepositoryResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, views, likes, created_at
            FROM categories
            ORDER BY likes DESC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }
}
