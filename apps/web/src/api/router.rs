use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{accounts, rango};
use crate::api::state::AppState;

/// Builds the application router
pub fn router(state: AppState) -> Router {
    let media = ServeDir::new(state.media.root());

    Router::new()
        .route("/", get(rango::index))
        .route("/about/", get(rango::about))
        .route(
            "/category/add/",
            get(rango::add_category_form).post(rango::add_category),
        )
        .route("/category/:slug/", get(rango::show_category))
        .route(
            "/category/:slug/page/add/",
            get(rango::add_page_form).post(rango::add_page),
        )
        .route(
            "/register/",
            get(accounts::register_form).post(accounts::register),
        )
        .route("/login/", get(accounts::login_form).post(accounts::user_login))
        .route("/logout/", get(accounts::user_logout))
        .route("/restricted/", get(accounts::restricted))
        .route("/health", get(accounts::health_check))
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
