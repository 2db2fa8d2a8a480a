use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Email, Username};

/// A registered account
///
/// `password_hash` always holds a bcrypt hash; the submitted password is
/// never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub email: Option<Email>,
    pub password_hash: String,
    pub is_active: bool,
}

/// Extra account data, one-to-one with a [`User`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub website: Option<String>,
    /// Path of the stored picture, relative to the media root
    pub picture: Option<String>,
}

impl User {
    /// Creates a new active user from an already-hashed password
    pub fn new(username: Username, email: Option<Email>, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_active: true,
        }
    }
}

/// Public view of a user, safe to place in a template context
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
        }
    }
}
