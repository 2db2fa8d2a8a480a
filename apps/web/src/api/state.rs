use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::api::errors::AppError;
use crate::domain::repositories::{CategoryRepository, PageRepository, UserRepository};
use crate::infrastructure::media::MediaStore;
use crate::infrastructure::repositories::{
    MemoryStore, PostgresCategoryRepository, PostgresPageRepository, PostgresUserRepository,
};
use crate::presentation::Renderer;

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub renderer: Arc<dyn Renderer>,
    pub media: MediaStore,
    pub session_secret: Arc<str>,
}

impl AppState {
    /// State backed by PostgreSQL repositories
    pub fn postgres(
        pool: PgPool,
        renderer: Arc<dyn Renderer>,
        media: MediaStore,
        session_secret: &str,
    ) -> Self {
        Self {
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            pages: Arc::new(PostgresPageRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
            renderer,
            media,
            session_secret: session_secret.into(),
        }
    }

    /// State backed by a shared in-memory store
    pub fn memory(
        store: Arc<MemoryStore>,
        renderer: Arc<dyn Renderer>,
        media: MediaStore,
        session_secret: &str,
    ) -> Self {
        Self {
            categories: store.clone(),
            pages: store.clone(),
            users: store,
            renderer,
            media,
            session_secret: session_secret.into(),
        }
    }

    /// Renders `template` against a serializable context
    pub fn render(&self, template: &str, context: &impl Serialize) -> Result<Response, AppError> {
        let context = serde_json::to_value(context)?;
        let body = self.renderer.render(template, &context)?;

        Ok(([(CONTENT_TYPE, self.renderer.content_type())], body).into_response())
    }
}
