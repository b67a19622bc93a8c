//! User entity representing a registered DevKit account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::challenge::Challenge;

/// User entity, including the credential fields used by the one-time code flows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalised email address, the unique external identity
    pub email: String,

    /// Unique public handle
    pub username: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been verified
    pub verified: bool,

    /// Outstanding one-time code, if any
    pub challenge: Option<Challenge>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified user without an outstanding challenge
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            verified: false,
            challenge: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces any outstanding challenge
    pub fn set_challenge(&mut self, challenge: Challenge) {
        self.challenge = Some(challenge);
        self.updated_at = Utc::now();
    }

    /// Consumes the outstanding challenge and marks the email as verified
    pub fn consume_challenge(&mut self) {
        self.challenge = None;
        self.verified = true;
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Checks if a code is outstanding
    pub fn has_challenge(&self) -> bool {
        self.challenge.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        User::new(
            "user@example.com".to_string(),
            "rust_dev".to_string(),
            "$2b$04$hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_unverified_without_challenge() {
        let user = user();

        assert_eq!(user.email, "user@example.com");
        assert!(!user.verified);
        assert!(!user.has_challenge());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_set_challenge_overwrites_previous() {
        let mut user = user();
        let now = Utc::now();

        user.set_challenge(Challenge::new("111111".to_string(), now, Duration::minutes(15)));
        user.set_challenge(Challenge::new("222222".to_string(), now, Duration::minutes(15)));

        assert_eq!(user.challenge.as_ref().unwrap().code, "222222");
    }

    #[test]
    fn test_consume_challenge_clears_and_verifies() {
        let mut user = user();
        user.set_challenge(Challenge::new("123456".to_string(), Utc::now(), Duration::minutes(15)));

        user.consume_challenge();

        assert!(!user.has_challenge());
        assert!(user.verified);
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
