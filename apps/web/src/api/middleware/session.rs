use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts, HeaderMap},
    response::Redirect,
};
use std::convert::Infallible;

use crate::api::state::AppState;
use crate::auth::session::{verify_session_token, SESSION_HOURS};
use crate::domain::user::UserSummary;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "rango_session";

/// Identity of the requesting user, if a valid session is present
///
/// Never rejects: a missing, expired or tampered session is simply `None`,
/// and so is a session whose account is gone or no longer active.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     match user {
///         Some(user) => format!("Hello {}", user.username),
///         None => "Hello stranger".to_string(),
///     }
/// }
/// ```
pub struct CurrentUser(pub Option<UserSummary>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(CurrentUser(None));
        };

        let claims = match verify_session_token(token, &state.session_secret) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!("Ignoring invalid session: {}", e);
                return Ok(CurrentUser(None));
            }
        };

        // The account may have been disabled or removed since login
        let user = match state.users.find_by_id(claims.sub).await {
            Ok(Some(user)) if user.is_active => Some(UserSummary::from(&user)),
            Ok(Some(_)) => {
                tracing::debug!(user_id = %claims.sub, "Ignoring session of disabled account");
                None
            }
            Ok(None) => {
                tracing::debug!(user_id = %claims.sub, "Ignoring session of unknown account");
                None
            }
            Err(e) => {
                tracing::warn!(user_id = %claims.sub, "Failed to load session user: {}", e);
                None
            }
        };

        Ok(CurrentUser(user))
    }
}

/// Identity of a logged-in user; redirects to the login page otherwise
pub struct RequireUser(pub UserSummary);

#[async_trait]
impl FromRequestParts<AppState> for RequireUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => user,
            Err(never) => match never {},
        };

        user.map(RequireUser).ok_or_else(|| Redirect::to("/login/"))
    }
}

/// Extracts the session token from the request's cookies
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_HOURS * 60 * 60
    )
}

/// `Set-Cookie` value removing the session
pub fn cleared_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_session_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_static("csrftoken=abc; rango_session=tok.en.value"),
        );

        assert_eq!(session_token(&headers), Some("tok.en.value"));
    }

    #[test]
    fn empty_or_missing_session_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("rango_session="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("rango_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cleared_session_cookie().contains("Max-Age=0"));
    }
}
