// Session token creation and verification
// A session is a signed JWT with an 8-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a session, in hours
pub const SESSION_HOURS: i64 = 8;

/// Session claims
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `name` - Username at login time
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub exp: usize,
}

/// Creates a session token for a user
///
/// # Example
/// ```
/// use rango::auth::session::{create_session_token, verify_session_token};
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let token = create_session_token(user_id, "leifos", "secret").unwrap();
///
/// let claims = verify_session_token(&token, "secret").expect("valid token");
/// assert_eq!(claims.sub, user_id);
/// assert_eq!(claims.name, "leifos");
/// ```
pub fn create_session_token(user_id: Uuid, username: &str, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(SESSION_HOURS);
    let claims = Claims {
        sub: user_id,
        name: username.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a session token
///
/// # Returns
/// * `Ok(Claims)` - If the signature is valid and the token has not expired
/// * `Err(String)` - Otherwise
pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = create_session_token(user_id, "jill", TEST_SECRET).expect("valid token");

        let claims = verify_session_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "jill");
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_session_token(Uuid::new_v4(), "jill", TEST_SECRET).unwrap();
        assert!(verify_session_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert!(verify_session_token("invalid.token.string", TEST_SECRET).is_err());
    }

    #[test]
    fn token_expiry_set() {
        let token = create_session_token(Uuid::new_v4(), "jill", TEST_SECRET).unwrap();

        let claims = verify_session_token(&token, TEST_SECRET).unwrap();
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_8_hours = (Utc::now() + Duration::hours(SESSION_HOURS)).timestamp();

        assert!(expiry_time > now);
        assert!(expiry_time <= in_8_hours + 10);
    }
}
