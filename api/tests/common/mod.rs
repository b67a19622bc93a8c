//! Shared wiring for handler tests: real services over in-memory collaborators

#![allow(dead_code)]

use actix_web::web;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

use dk_api::routes::AppState;
use dk_core::repositories::MockUserRepository;
use dk_core::services::verification::mocks::{FixedClock, RecordingMailGateway};
use dk_core::services::verification::SequenceCodeGenerator;
use dk_core::services::{
    AccountService, AccountServiceConfig, StaticTextGenerator, UsernameSuggestionService,
    VerificationService, VerificationServiceConfig,
};

pub type TestState = AppState<MockUserRepository, RecordingMailGateway, StaticTextGenerator>;

pub struct TestContext {
    pub users: Arc<MockUserRepository>,
    pub mail: Arc<RecordingMailGateway>,
    pub clock: Arc<FixedClock>,
    pub state: web::Data<TestState>,
}

impl TestContext {
    /// Codes are handed out in order, one per issuance
    pub fn new(codes: &[&str]) -> Self {
        Self::build(codes, RecordingMailGateway::default(), StaticTextGenerator::default())
    }

    pub fn with_failing_mail(codes: &[&str]) -> Self {
        Self::build(codes, RecordingMailGateway::new(true), StaticTextGenerator::default())
    }

    pub fn with_generator(generator: StaticTextGenerator) -> Self {
        Self::build(&["111111"], RecordingMailGateway::default(), generator)
    }

    fn build(
        codes: &[&str],
        mail: RecordingMailGateway,
        generator: StaticTextGenerator,
    ) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let mail = Arc::new(mail);
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        ));

        let verification_service = Arc::new(
            VerificationService::new(
                users.clone(),
                mail.clone(),
                VerificationServiceConfig::default(),
            )
            .unwrap()
            .with_generator(Arc::new(SequenceCodeGenerator::new(codes.iter().copied())))
            .with_clock(clock.clone()),
        );
        let account_service = Arc::new(AccountService::new(
            users.clone(),
            verification_service.clone(),
            AccountServiceConfig { bcrypt_cost: 4 },
        ));
        let suggestion_service = Arc::new(UsernameSuggestionService::new(
            users.clone(),
            Arc::new(generator),
            "Suggest five usernames",
        ));

        Self {
            users,
            mail,
            clock,
            state: web::Data::new(AppState {
                verification_service,
                account_service,
                suggestion_service,
            }),
        }
    }
}

pub fn register_body(email: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "username": username,
        "password": "correct horse battery"
    })
}
