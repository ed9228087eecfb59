//! User and session domain models
//!
//! This is mock authentication. The session marker has no integrity
//! protection and existence alone grants access.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Shortest password accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// A registered user as persisted in the `ticketapp_users` slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn session(&self) -> Session {
        Session {
            email: self.email.clone(),
            id: self.id,
        }
    }
}

/// The session marker stored in the `ticketapp_session` slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub id: i64,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

pub fn require_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::validation("email and password are required"));
    }
    Ok(())
}

/// Signup form rules: presence, email shape, password length
pub fn validate_signup(email: &str, password: &str) -> Result<()> {
    require_credentials(email, password)?;
    if !email_pattern().is_match(email) {
        return Err(Error::validation("please enter a valid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_session() {
        let user = User::new(1700000000000, "a@b.com", "$argon2id$...");
        let session = user.session();
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.id, 1700000000000);
    }

    #[test]
    fn test_session_json_shape() {
        let session = Session {
            email: "a@b.com".to_string(),
            id: 7,
        };
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"email":"a@b.com","id":7}"#);
    }

    #[test]
    fn test_validate_signup() {
        assert!(validate_signup("a@b.com", "secret1").is_ok());
        assert!(validate_signup("", "secret1").is_err());
        assert!(validate_signup("not-an-email", "secret1").is_err());
        assert!(validate_signup("a b@c.com", "secret1").is_err());

        let err = validate_signup("a@b.com", "12345").unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }
}
