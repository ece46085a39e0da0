//! User Entity
//!
//! The identity record: profile fields, the password hash, and the
//! server-side session anchor.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, UserId, UserName, UserPassword};

/// User entity
///
/// `current_refresh_token` is the revocation anchor: it is either `None`
/// (no live session) or exactly the most recently issued refresh token.
/// A presented refresh token that does not match this value is rejected
/// even when its signature is still valid. The application layer is the
/// sole writer of this field.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, case-insensitive, for login and display)
    pub user_name: UserName,
    /// Email address (unique, for login)
    pub email: Email,
    /// Display name
    pub full_name: String,
    /// Argon2id password hash (PHC string)
    pub password_hash: UserPassword,
    /// The single currently-valid refresh token, if any
    pub current_refresh_token: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no live session
    pub fn new(
        user_name: UserName,
        email: Email,
        full_name: String,
        password_hash: UserPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            full_name,
            password_hash,
            current_refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash
    pub fn set_password_hash(&mut self, hash: UserPassword) {
        self.password_hash = hash;
        self.updated_at = Utc::now();
    }

    /// Whether this user currently has a live session
    pub fn has_session(&self) -> bool {
        self.current_refresh_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::RawPassword;

    fn sample_user() -> User {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
            "Alice Example".to_string(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_user_has_no_session() {
        let user = sample_user();
        assert!(user.current_refresh_token.is_none());
        assert!(!user.has_session());
    }

    #[test]
    fn test_set_password_hash_touches_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at;

        let raw = RawPassword::new("AnotherPassword1!".to_string()).unwrap();
        user.set_password_hash(UserPassword::from_raw(&raw, None).unwrap());

        assert!(user.updated_at >= before);
        assert!(user.password_hash.verify(&raw, None));
    }
}
