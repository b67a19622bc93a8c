//! Account service implementation

use std::sync::Arc;

use dk_shared::validation::{is_valid_password, is_valid_username, mask_email};

use crate::domain::entities::{Challenge, ChallengeFlow, User};
use crate::domain::value_objects::Email;
use crate::errors::{AccountError, DomainError, DomainResult, OtpError};
use crate::repositories::UserRepository;
use crate::services::verification::{IssuedChallenge, MailGateway, VerificationService};

use super::config::AccountServiceConfig;

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegisteredAccount {
    pub user: User,
    /// The verify-email challenge sent to the new account
    pub issued: IssuedChallenge,
}

/// Registration, password reset and username lookups
pub struct AccountService<R: UserRepository, M: MailGateway> {
    user_repository: Arc<R>,
    verification_service: Arc<VerificationService<R, M>>,
    config: AccountServiceConfig,
}

impl<R: UserRepository, M: MailGateway> AccountService<R, M> {
    pub fn new(
        user_repository: Arc<R>,
        verification_service: Arc<VerificationService<R, M>>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            config,
        }
    }

    /// Register a new, unverified account and send it a verify-email code
    ///
    /// # Returns
    ///
    /// * `Ok(RegisteredAccount)` - The stored user and the issued challenge
    /// * `Err(DomainError::Account(..))` - Email or username already in use
    /// * `Err(DomainError)` - Invalid input or store failure
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> DomainResult<RegisteredAccount> {
        let email = Email::parse(email)?;
        Self::check_username(username)?;
        Self::check_password(password)?;

        if self.user_repository.exists_by_email(email.as_str()).await? {
            return Err(AccountError::EmailTaken.into());
        }
        if self.user_repository.exists_by_username(username).await? {
            return Err(AccountError::UsernameTaken {
                username: username.to_string(),
            }
            .into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .user_repository
            .create(User::new(
                email.as_str().to_string(),
                username.to_string(),
                password_hash,
            ))
            .await?;

        tracing::info!(
            email = %mask_email(&user.email),
            user_id = %user.id,
            event = "account_registered",
            "Registered new account"
        );

        let issued = self
            .verification_service
            .issue_challenge(email.as_str(), ChallengeFlow::VerifyEmail)
            .await?;

        Ok(RegisteredAccount { user, issued })
    }

    /// Consume a reset-password challenge and store a new password
    ///
    /// Fails with the same reasons as code verification. The new password is
    /// hashed before the code is consumed, and if the final write fails the
    /// consumed challenge is put back so the same code can be retried.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        Self::check_password(new_password)?;
        let email = Email::parse(email)?;
        let password_hash = self.hash_password(new_password).await?;

        let challenge = self
            .verification_service
            .verify_challenge(email.as_str(), code)
            .await?;

        let updated = match self
            .user_repository
            .update_password(email.as_str(), &password_hash)
            .await
        {
            Ok(updated) => updated,
            Err(e) => {
                self.restore_challenge(email.as_str(), &challenge).await;
                return Err(e);
            }
        };
        if !updated {
            return Err(OtpError::NotFound.into());
        }

        tracing::info!(
            email = %mask_email(email.as_str()),
            event = "password_reset",
            "Password reset completed"
        );

        Ok(())
    }

    /// Whether `username` is well formed and not taken
    pub async fn username_available(&self, username: &str) -> DomainResult<bool> {
        Self::check_username(username)?;
        Ok(!self.user_repository.exists_by_username(username).await?)
    }

    fn check_username(username: &str) -> DomainResult<()> {
        if !is_valid_username(username) {
            return Err(DomainError::validation(
                "Username must be 3-20 characters of lowercase letters, digits or underscores",
            ));
        }
        Ok(())
    }

    fn check_password(password: &str) -> DomainResult<()> {
        if !is_valid_password(password) {
            return Err(DomainError::validation(
                "Password must be between 8 and 72 characters",
            ));
        }
        Ok(())
    }

    async fn restore_challenge(&self, email: &str, challenge: &Challenge) {
        match self.user_repository.store_challenge(email, challenge).await {
            Ok(_) => tracing::warn!(
                email = %mask_email(email),
                event = "password_reset_rolled_back",
                "Password update failed, reset code restored"
            ),
            Err(e) => tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "password_reset_rollback_failed",
                "Password update failed and the reset code could not be restored"
            ),
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }
}
