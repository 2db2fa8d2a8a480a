use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::postgres_errors::write_error;
use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::{Email, User, UserProfile, Username};

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: Option<String>,
    password_hash: String,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(r.username)
            .map_err(|e| RepositoryError::CorruptRow(format!("username: {}", e)))?;
        let email = r
            .email
            .map(Email::new)
            .transpose()
            .map_err(|e| RepositoryError::CorruptRow(format!("email: {}", e)))?;

        Ok(User {
            id: r.id,
            username,
            email,
            password_hash: r.password_hash,
            is_active: r.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    website: Option<String>,
    picture: Option<String>,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_with_profile(
        &self,
        user: &User,
        profile: &UserProfile,
    ) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_active)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(user.username.as_str())
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(&user.password_hash)
        .bind(user.is_active)
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, user.username.as_str(), |_| "username"))?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, website, picture)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id)
        .bind(profile.website.as_deref())
        .bind(profile.picture.as_deref())
        .execute(&mut *tx)
        .await?;

        // Dropping the transaction without commit rolls back both inserts
        tx.commit().await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, is_active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_profile(&self, user_id: Uuid) -> RepositoryResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, website, picture
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| UserProfile {
            user_id: r.user_id,
            website: r.website,
            picture: r.picture,
        }))
    }
}
