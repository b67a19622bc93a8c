//! User repository trait defining the interface for credential record persistence.
//!
//! The trait is async-first and keyed by the normalised email address, which is
//! the external identity of every account. Implementations map store-level
//! failures to `DomainError::Persistence` and unique-key violations to
//! `AccountError`.

use async_trait::async_trait;

use crate::domain::entities::{Challenge, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use dk_core::domain::entities::{Challenge, User};
/// use dk_core::errors::DomainError;
/// use dk_core::repositories::UserRepository;
///
/// struct MongoUserRepository {
///     // collection handle
/// }
///
/// #[async_trait]
/// impl UserRepository for MongoUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn exists_by_email(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn exists_by_username(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn store_challenge(&self, _: &str, _: &Challenge) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn consume_challenge(&self, _: &str, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn update_password(&self, _: &str, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalised email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account for this address
    /// * `Err(DomainError)` - The store failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if an account exists for the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Check if a username is already taken
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Account(..))` - Email or username already in use
    /// * `Err(DomainError)` - The store failed
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the outstanding challenge of an account
    ///
    /// Unconditional overwrite: concurrent issuers race and the last write wins.
    ///
    /// # Returns
    /// * `Ok(true)` - Challenge stored
    /// * `Ok(false)` - No account for this address
    async fn store_challenge(&self, email: &str, challenge: &Challenge)
        -> Result<bool, DomainError>;

    /// Clear the outstanding challenge and mark the account verified, but only
    /// while the stored code is still `code`
    ///
    /// # Returns
    /// * `Ok(true)` - This call consumed the challenge
    /// * `Ok(false)` - The challenge was already consumed or replaced
    async fn consume_challenge(&self, email: &str, code: &str) -> Result<bool, DomainError>;

    /// Replace the stored password hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - No account for this address
    async fn update_password(&self, email: &str, password_hash: &str)
        -> Result<bool, DomainError>;
}
