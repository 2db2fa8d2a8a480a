use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::user::{User, UserProfile, Username};

/// Repository trait for users and their profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user together with its profile
    ///
    /// Either both rows are written or neither is. A taken username is
    /// reported as a conflict on `username`.
    async fn create_with_profile(&self, user: &User, profile: &UserProfile)
        -> RepositoryResult<()>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;

    /// Find the profile belonging to a user
    async fn find_profile(&self, user_id: Uuid) -> RepositoryResult<Option<UserProfile>>;
}
