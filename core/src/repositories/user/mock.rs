//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Challenge, User};
use crate::errors::{AccountError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository keyed by email
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
    should_fail: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail as if the store were unreachable
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the stored record, for assertions
    pub async fn get(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("Mock store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.contains_key(email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(AccountError::EmailTaken.into());
        }
        if users.values().any(|u| u.username == user.username) {
            return Err(AccountError::UsernameTaken {
                username: user.username,
            }
            .into());
        }

        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn store_challenge(
        &self,
        email: &str,
        challenge: &Challenge,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.set_challenge(challenge.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn consume_challenge(&self, email: &str, code: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) if user.challenge.as_ref().is_some_and(|c| c.code == code) => {
                user.consume_challenge();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.set_password_hash(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
