use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;

use crate::api::errors::AppError;
use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::domain::category::Category;
use crate::domain::page::Page;
use crate::domain::repositories::RepositoryError;
use crate::domain::user::UserSummary;
use crate::forms::{BoundForm, CategoryForm, FormData, PageForm, Validated};
use crate::presentation::templates;

const INDEX_MESSAGE: &str = "Crunchy, creamy, cookie, candy, cupcake!";
const ABOUT_MESSAGE: &str = "This tutorial has been put together by Emily Murphy";

/// How many categories and pages the index lists
const TOP_N: usize = 5;

#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub boldmessage: &'static str,
    pub categories: Vec<Category>,
    pub pages: Vec<Page>,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct AboutContext {
    pub boldmessage: &'static str,
    pub user: Option<UserSummary>,
}

/// Both fields are `None` when the slug matched nothing
#[derive(Debug, Serialize)]
pub struct CategoryContext {
    pub category: Option<Category>,
    pub pages: Option<Vec<Page>>,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct AddCategoryContext {
    pub form: BoundForm,
    pub user: Option<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct AddPageContext {
    pub form: BoundForm,
    pub category: Category,
    pub user: Option<UserSummary>,
}

/// Most liked categories and most viewed pages
///
/// GET /
pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let categories = state.categories.top_by_likes(TOP_N).await?;
    let pages = state.pages.top_by_views(TOP_N).await?;

    state.render(
        templates::INDEX,
        &IndexContext {
            boldmessage: INDEX_MESSAGE,
            categories,
            pages,
            user,
        },
    )
}

/// GET /about/
pub async fn about(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    state.render(
        templates::ABOUT,
        &AboutContext {
            boldmessage: ABOUT_MESSAGE,
            user,
        },
    )
}

/// A category and its pages, or the empty state for an unknown slug
///
/// GET /category/:slug/
pub async fn show_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let context = match state.categories.find_by_slug(&slug).await? {
        Some(category) => {
            let pages = state.pages.find_by_category(category.id()).await?;
            CategoryContext {
                category: Some(category),
                pages: Some(pages),
                user,
            }
        }
        None => {
            tracing::debug!(slug = %slug, "Category not found");
            CategoryContext {
                category: None,
                pages: None,
                user,
            }
        }
    };

    state.render(templates::CATEGORY, &context)
}

/// GET /category/add/
pub async fn add_category_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    state.render(
        templates::ADD_CATEGORY,
        &AddCategoryContext {
            form: BoundForm::empty(),
            user,
        },
    )
}

/// Creates a category and returns to the index
///
/// POST /category/add/
pub async fn add_category(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let form = match CategoryForm::validate(&data) {
        Validated::Valid(category) => match state.categories.create(&category).await {
            Ok(()) => {
                tracing::info!(slug = category.slug(), "Category created");
                return Ok(Redirect::to("/").into_response());
            }
            Err(err) => CategoryForm::conflict(&data, &err).ok_or(err)?,
        },
        Validated::Invalid(form) => form,
    };

    tracing::debug!(errors = ?form.errors, "Category form rejected");
    state.render(templates::ADD_CATEGORY, &AddCategoryContext { form, user })
}

/// GET /category/:slug/page/add/
pub async fn add_page_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let Some(category) = state.categories.find_by_slug(&slug).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    state.render(
        templates::ADD_PAGE,
        &AddPageContext {
            form: BoundForm::empty(),
            category,
            user,
        },
    )
}

/// Files a new page under the category and returns to it
///
/// An unknown slug redirects to the index without writing anything.
///
/// POST /category/:slug/page/add/
pub async fn add_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    CurrentUser(user): CurrentUser,
    Form(data): Form<FormData>,
) -> Result<Response, AppError> {
    let Some(category) = state.categories.find_by_slug(&slug).await? else {
        tracing::debug!(slug = %slug, "Refusing page for unknown category");
        return Ok(Redirect::to("/").into_response());
    };

    match PageForm::validate(&data, &category) {
        Validated::Valid(page) => match state.pages.create(&page).await {
            Ok(()) => {
                tracing::info!(category = category.slug(), title = page.title(), "Page created");
                Ok(Redirect::to(&format!("/category/{}/", category.slug())).into_response())
            }
            // The category vanished between lookup and insert
            Err(RepositoryError::MissingReference(_)) => Ok(Redirect::to("/").into_response()),
            Err(err) => Err(err.into()),
        },
        Validated::Invalid(form) => {
            tracing::debug!(errors = ?form.errors, "Page form rejected");
            state.render(
                templates::ADD_PAGE,
                &AddPageContext {
                    form,
                    category,
                    user,
                },
            )
        }
    }
}
