use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::page::Page;
use crate::domain::repositories::{PageRepository, RepositoryError, RepositoryResult};

/// PostgreSQL implementation of PageRepository
pub struct PostgresPageRepository {
    pool: PgPool,
}

impl PostgresPageRepository {
    /// Creates a new PostgresPageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PageRow {
    id: Uuid,
    category_id: Uuid,
    title: String,
    url: String,
    views: i32,
    created_at: DateTime<Utc>,
}

impl From<PageRow> for Page {
    fn from(r: PageRow) -> Self {
        Page::from_persistence(r.id, r.category_id, r.title, r.url, r.views, r.created_at)
    }
}

#[async_trait]
impl PageRepository for PostgresPageRepository {
    async fn create(&self, page: &Page) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pages (id, category_id, title, url, views, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(page.id())
        .bind(page.category_id())
        .bind(page.title())
        .bind(page.url())
        .bind(page.views())
        .bind(page.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::MissingReference("category")
            }
            _ => RepositoryError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_category(&self, category_id: Uuid) -> RepositoryResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, created_at
            FROM pages
            WHERE category_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Page::from).collect())
    }

    async fn top_by_views(&self, limit: usize) -> RepositoryResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, created_at
            FROM pages
            ORDER BY views DESC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Page::from).collect())
    }
}
