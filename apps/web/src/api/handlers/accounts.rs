use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::errors::AppError;
use crate::api::middleware::session::{cleared_session_cookie, session_cookie};
use crate::api::middleware::{CurrentUser, RegistrationSubmission, RequireUser};
use crate::api::state::AppState;
use crate::auth::authenticate;
use crate::auth::password::hash_password;
use crate::auth::session::create_session_token;
use crate::domain::user::{User, UserProfile, UserSummary};
use crate::forms::{BoundForm, UserForm, UserInput, UserProfileForm, Validated};
use crate::presentation::templates;

pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login details supplied.";
pub const DISABLED_ACCOUNT_MESSAGE: &str = "Your Rango account is disabled.";

#[derive(Debug, Serialize)]
pub struct RegisterContext {
    pub user_form: BoundForm,
    pub profile_form: BoundForm,
    pub registered: bool,
    pub user: Option<UserSummary>,
}

impl RegisterContext {
    fn rejected(user_form: BoundForm, profile_form: BoundForm, user: Option<UserSummary>) -> Self {
        tracing::debug!(
            user_errors = ?user_form.errors,
            profile_errors = ?profile_form.errors,
            "Registration rejected"
        );
        Self {
            user_form,
            profile_form,
            registered: false,
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestrictedContext {
    pub user: UserSummary,
}

/// Login submission; absent fields are empty
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// GET /register/
pub async fn register_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    state.render(
        templates::REGISTER,
        &RegisterContext {
            user_form: BoundForm::empty(),
            profile_form: BoundForm::empty(),
            registered: false,
            user,
        },
    )
}

/// Creates an account and its profile
///
/// Both forms are validated before anything is written; the user and
/// profile rows are then stored together or not at all.
///
/// POST /register/
pub async fn register(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    submission: RegistrationSubmission,
) -> Result<Response, AppError> {
    let RegistrationSubmission { fields, picture } = submission;

    let (account, profile_input) = match (
        UserForm::validate(&fields),
        UserProfileForm::validate(&fields, picture),
    ) {
        (Validated::Valid(account), Validated::Valid(profile)) => (account, profile),
        (account, profile) => {
            let user_form = match account {
                Validated::Invalid(form) => form,
                Validated::Valid(_) => UserForm::bind(&fields),
            };
            let profile_form = match profile {
                Validated::Invalid(form) => form,
                Validated::Valid(_) => UserProfileForm::bind(&fields),
            };
            return state.render(
                templates::REGISTER,
                &RegisterContext::rejected(user_form, profile_form, user),
            );
        }
    };

    let UserInput {
        username,
        email,
        password,
    } = account;
    // bcrypt is CPU-bound
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal_server_error(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::internal_server_error(format!("Failed to hash password: {}", e)))?;
    let new_user = User::new(username, email, password_hash);

    let picture = match profile_input.picture {
        Some(upload) => match state
            .media
            .save_profile_picture(new_user.id, upload.file_name.as_deref(), &upload.bytes)
            .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(user_id = %new_user.id, "Registering without picture: {}", e);
                None
            }
        },
        None => None,
    };

    let profile = UserProfile {
        user_id: new_user.id,
        website: profile_input.website,
        picture,
    };

    if let Err(err) = state.users.create_with_profile(&new_user, &profile).await {
        if let Some(path) = &profile.picture {
            if let Err(e) = state.media.remove(path).await {
                tracing::warn!("Failed to remove orphaned picture {}: {}", path, e);
            }
        }

        let user_form = UserForm::conflict(&fields, &err).ok_or(err)?;
        return state.render(
            templates::REGISTER,
            &RegisterContext::rejected(user_form, UserProfileForm::bind(&fields), user),
        );
    }

    tracing::info!(user_id = %new_user.id, username = %new_user.username, "User registered");

    state.render(
        templates::REGISTER,
        &RegisterContext {
            user_form: BoundForm::empty(),
            profile_form: BoundForm::empty(),
            registered: true,
            user,
        },
    )
}

/// GET /login/
pub async fn login_form(State(state): State<AppState>) -> Result<Response, AppError> {
    state.render(templates::LOGIN, &json!({}))
}

/// Checks credentials and establishes a session
///
/// POST /login/
pub async fn user_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = authenticate(state.users.as_ref(), &form.username, &form.password).await?
    else {
        tracing::warn!(username = %form.username, "Invalid login details");
        return Ok((StatusCode::UNAUTHORIZED, INVALID_LOGIN_MESSAGE).into_response());
    };

    if !user.is_active {
        tracing::warn!(user_id = %user.id, "Login attempt on disabled account");
        return Ok((StatusCode::FORBIDDEN, DISABLED_ACCOUNT_MESSAGE).into_response());
    }

    let token = create_session_token(user.id, user.username.as_str(), &state.session_secret)
        .map_err(|e| AppError::internal_server_error(format!("Failed to create session: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(([(SET_COOKIE, session_cookie(&token))], Redirect::to("/")).into_response())
}

/// Ends the session
///
/// GET /logout/
pub async fn user_logout() -> Response {
    ([(SET_COOKIE, cleared_session_cookie())], Redirect::to("/")).into_response()
}

/// GET /restricted/
pub async fn restricted(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Response, AppError> {
    state.render(templates::RESTRICTED, &RestrictedContext { user })
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
