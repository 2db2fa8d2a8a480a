use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rango::api::{self, AppState};
use rango::config::{AppConfig, RendererKind, StoreBackend};
use rango::infrastructure::database;
use rango::infrastructure::media::MediaStore;
use rango::infrastructure::repositories::MemoryStore;
use rango::presentation::{HtmlRenderer, JsonRenderer, Renderer};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let renderer: Arc<dyn Renderer> = match config.renderer {
        RendererKind::Html => Arc::new(HtmlRenderer),
        RendererKind::Json => Arc::new(JsonRenderer),
    };
    let media = MediaStore::new(&config.media_root);

    let state = match &config.store {
        StoreBackend::Postgres {
            url,
            max_connections,
        } => {
            let pool = database::connect(url, *max_connections)
                .await
                .expect("Failed to connect to database");
            AppState::postgres(pool, renderer, media, &config.session_secret)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on exit");
            AppState::memory(
                Arc::new(MemoryStore::new()),
                renderer,
                media,
                &config.session_secret,
            )
        }
    };

    let app = api::router(state);

    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
