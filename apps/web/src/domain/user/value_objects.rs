use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a username, in characters
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Username value object
///
/// # Invariants
/// - Between 1 and 150 characters
/// - Only letters, digits and `@ . + - _`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use rango::domain::user::value_objects::Username;
    ///
    /// let username = Username::new("leifos").expect("valid username");
    /// assert_eq!(username.as_str(), "leifos");
    /// assert!(Username::new("no spaces").is_err());
    /// ```
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        let username = username.into();

        if username.is_empty() {
            return Err("This field is required.".to_string());
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(format!(
                "Ensure this value has at most {} characters.",
                USERNAME_MAX_LENGTH
            ));
        }

        if !username.chars().all(Self::is_allowed) {
            return Err(
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                    .to_string(),
            );
        }

        Ok(Username(username))
    }

    fn is_allowed(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email value object representing a valid email address
///
/// # Invariants
/// - Exactly one '@' with a non-empty local part and domain
/// - No whitespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use rango::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("test@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "test@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err("Enter a valid email address.".to_string())
        }
    }

    fn is_valid(email: &str) -> bool {
        if email.chars().any(char::is_whitespace) {
            return false;
        }

        match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_username() {
        assert!(Username::new("jill.smith+rango@home_1").is_ok());
    }

    #[test]
    fn username_with_space_is_invalid() {
        assert!(Username::new("jill smith").is_err());
    }

    #[test]
    fn empty_username_is_invalid() {
        assert!(Username::new("").unwrap_err().contains("required"));
    }

    #[test]
    fn long_username_is_invalid() {
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)).is_err());
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_with_subdomain() {
        assert!(Email::new("user@mail.example.com").is_ok());
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_missing_domain() {
        assert!(Email::new("a@").is_err());
    }

    #[test]
    fn invalid_email_two_at_symbols() {
        assert!(Email::new("a@b@c").is_err());
    }

    #[test]
    fn invalid_email_with_whitespace() {
        assert!(Email::new("a b@example.com").is_err());
    }

    #[test]
    fn email_display() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(format!("{}", email), "test@example.com");
    }
}
