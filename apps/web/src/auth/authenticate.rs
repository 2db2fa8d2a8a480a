use crate::auth::password::verify_password;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{User, Username};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Password verification failed: {0}")]
    Verification(String),
}

/// Checks a username/password pair against the stored accounts
///
/// Returns the matching user whether or not it is active; callers decide
/// what an inactive account means. A malformed username can never match
/// and yields `Ok(None)`.
pub async fn authenticate(
    users: &dyn UserRepository,
    username: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    let Ok(username) = Username::new(username) else {
        return Ok(None);
    };

    let Some(user) = users.find_by_username(&username).await? else {
        return Ok(None);
    };

    let password = password.to_string();
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Verification(e.to_string()))?
        .map_err(AuthError::Verification)?;

    Ok(valid.then_some(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::domain::user::UserProfile;
    use crate::infrastructure::repositories::MemoryStore;

    async fn store_with(username: &str, password: &str) -> MemoryStore {
        let store = MemoryStore::new();
        let user = User::new(
            Username::new(username).unwrap(),
            None,
            hash_password(password).unwrap(),
        );
        let profile = UserProfile {
            user_id: user.id,
            website: None,
            picture: None,
        };
        store.create_with_profile(&user, &profile).await.unwrap();
        store
    }

    #[tokio::test]
    async fn correct_credentials_return_user() {
        let store = store_with("leifos", "pa55word").await;

        let user = authenticate(&store, "leifos", "pa55word").await.unwrap();
        assert_eq!(user.unwrap().username.as_str(), "leifos");
    }

    #[tokio::test]
    async fn wrong_password_returns_none() {
        let store = store_with("leifos", "pa55word").await;
        assert!(authenticate(&store, "leifos", "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_or_malformed_username_returns_none() {
        let store = store_with("leifos", "pa55word").await;
        assert!(authenticate(&store, "ghost", "pa55word").await.unwrap().is_none());
        assert!(authenticate(&store, "", "").await.unwrap().is_none());
        assert!(authenticate(&store, "bad name", "x").await.unwrap().is_none());
    }
}
