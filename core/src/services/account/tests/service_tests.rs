//! Unit tests for account service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::{Challenge, ChallengeFlow, User};
use crate::errors::{AccountError, DomainError, OtpError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::verification::mocks::RecordingMailGateway;
use crate::services::verification::{
    SequenceCodeGenerator, VerificationService, VerificationServiceConfig,
};

const EMAIL: &str = "new@example.com";
const PASSWORD: &str = "correct horse";

struct Harness {
    repo: Arc<MockUserRepository>,
    mail: Arc<RecordingMailGateway>,
    verification: Arc<VerificationService<MockUserRepository, RecordingMailGateway>>,
    service: AccountService<MockUserRepository, RecordingMailGateway>,
}

fn harness(codes: &[&str]) -> Harness {
    let repo = Arc::new(MockUserRepository::new());
    let mail = Arc::new(RecordingMailGateway::default());
    let verification = Arc::new(
        VerificationService::new(
            repo.clone(),
            mail.clone(),
            VerificationServiceConfig::default(),
        )
        .unwrap()
        .with_generator(Arc::new(SequenceCodeGenerator::new(codes.iter().copied()))),
    );
    let service = AccountService::new(
        repo.clone(),
        verification.clone(),
        AccountServiceConfig { bcrypt_cost: 4 },
    );

    Harness {
        repo,
        mail,
        verification,
        service,
    }
}

#[tokio::test]
async fn test_register_creates_unverified_user_and_sends_code() {
    let h = harness(&["123456"]);

    let registered = h
        .service
        .register(" New@Example.com", "new_user", PASSWORD)
        .await
        .unwrap();

    assert_eq!(registered.user.email, EMAIL);
    assert_eq!(registered.issued.flow, ChallengeFlow::VerifyEmail);

    let stored = h.repo.get(EMAIL).await.unwrap();
    assert!(!stored.verified);
    assert_eq!(stored.challenge.map(|c| c.code), Some("123456".to_string()));
    assert!(bcrypt::verify(PASSWORD, &stored.password_hash).unwrap());
    assert!(h.mail.last_sent_to(EMAIL).unwrap().html_body.contains("123456"));
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let h = harness(&["123456"]);
    h.service.register(EMAIL, "new_user", PASSWORD).await.unwrap();

    let same_email = h.service.register(EMAIL, "other_user", PASSWORD).await;
    assert!(matches!(
        same_email,
        Err(DomainError::Account(AccountError::EmailTaken))
    ));

    let same_username = h
        .service
        .register("other@example.com", "new_user", PASSWORD)
        .await;
    assert!(matches!(
        same_username,
        Err(DomainError::Account(AccountError::UsernameTaken { .. }))
    ));
}

#[tokio::test]
async fn test_register_validates_input() {
    let h = harness(&["123456"]);

    for (email, username, password) in [
        ("bad-email", "new_user", PASSWORD),
        (EMAIL, "No Caps", PASSWORD),
        (EMAIL, "new_user", "short"),
    ] {
        let result = h.service.register(email, username, password).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
    assert!(h.repo.get(EMAIL).await.is_none());
}

#[tokio::test]
async fn test_reset_password_with_valid_code() {
    let h = harness(&["111111", "222222"]);
    h.service.register(EMAIL, "new_user", PASSWORD).await.unwrap();
    h.verification
        .issue_challenge(EMAIL, ChallengeFlow::ResetPassword)
        .await
        .unwrap();

    h.service
        .reset_password(EMAIL, "222222", "brand new secret")
        .await
        .unwrap();

    let stored = h.repo.get(EMAIL).await.unwrap();
    assert!(bcrypt::verify("brand new secret", &stored.password_hash).unwrap());
    assert!(stored.challenge.is_none());
}

#[tokio::test]
async fn test_reset_password_wrong_code_keeps_password() {
    let h = harness(&["111111"]);
    h.service.register(EMAIL, "new_user", PASSWORD).await.unwrap();

    let result = h
        .service
        .reset_password(EMAIL, "999999", "brand new secret")
        .await;

    assert!(matches!(result, Err(DomainError::Otp(OtpError::Mismatch))));
    let stored = h.repo.get(EMAIL).await.unwrap();
    assert!(bcrypt::verify(PASSWORD, &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_username_available() {
    let h = harness(&["111111"]);
    h.service.register(EMAIL, "new_user", PASSWORD).await.unwrap();

    assert!(!h.service.username_available("new_user").await.unwrap());
    assert!(h.service.username_available("free_name").await.unwrap());
    assert!(matches!(
        h.service.username_available("x").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_reset_password_hash_failure_keeps_code() {
    let h = harness(&["111111", "222222"]);
    h.service.register(EMAIL, "new_user", PASSWORD).await.unwrap();
    h.verification
        .issue_challenge(EMAIL, ChallengeFlow::ResetPassword)
        .await
        .unwrap();

    // bcrypt refuses costs below 4
    let broken = AccountService::new(
        h.repo.clone(),
        h.verification.clone(),
        AccountServiceConfig { bcrypt_cost: 3 },
    );
    let result = broken
        .reset_password(EMAIL, "222222", "brand new secret")
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    let stored = h.repo.get(EMAIL).await.unwrap();
    assert_eq!(stored.challenge.map(|c| c.code), Some("222222".to_string()));

    h.service
        .reset_password(EMAIL, "222222", "brand new secret")
        .await
        .unwrap();
}

/// Delegates to the in-memory store but can refuse password writes
struct FlakyPasswordStore {
    inner: MockUserRepository,
    fail_password_updates: AtomicBool,
}

#[async_trait]
impl UserRepository for FlakyPasswordStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.inner.exists_by_email(email).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.inner.exists_by_username(username).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.inner.create(user).await
    }

    async fn store_challenge(
        &self,
        email: &str,
        challenge: &Challenge,
    ) -> Result<bool, DomainError> {
        self.inner.store_challenge(email, challenge).await
    }

    async fn consume_challenge(&self, email: &str, code: &str) -> Result<bool, DomainError> {
        self.inner.consume_challenge(email, code).await
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        if self.fail_password_updates.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("down"));
        }
        self.inner.update_password(email, password_hash).await
    }
}

#[tokio::test]
async fn test_reset_password_store_failure_restores_code() {
    let repo = Arc::new(FlakyPasswordStore {
        inner: MockUserRepository::new(),
        fail_password_updates: AtomicBool::new(true),
    });
    let mail = Arc::new(RecordingMailGateway::default());
    let verification = Arc::new(
        VerificationService::new(
            repo.clone(),
            mail.clone(),
            VerificationServiceConfig::default(),
        )
        .unwrap()
        .with_generator(Arc::new(SequenceCodeGenerator::new(["111111", "222222"]))),
    );
    let service = AccountService::new(
        repo.clone(),
        verification.clone(),
        AccountServiceConfig { bcrypt_cost: 4 },
    );

    service.register(EMAIL, "new_user", PASSWORD).await.unwrap();
    verification
        .issue_challenge(EMAIL, ChallengeFlow::ResetPassword)
        .await
        .unwrap();

    let result = service
        .reset_password(EMAIL, "222222", "brand new secret")
        .await;
    assert!(matches!(result, Err(DomainError::Persistence { .. })));

    let stored = repo.inner.get(EMAIL).await.unwrap();
    assert_eq!(stored.challenge.map(|c| c.code), Some("222222".to_string()));
    assert!(bcrypt::verify(PASSWORD, &stored.password_hash).unwrap());

    repo.fail_password_updates.store(false, Ordering::SeqCst);
    service
        .reset_password(EMAIL, "222222", "brand new secret")
        .await
        .unwrap();

    let stored = repo.inner.get(EMAIL).await.unwrap();
    assert!(bcrypt::verify("brand new secret", &stored.password_hash).unwrap());
    assert!(stored.challenge.is_none());
}
