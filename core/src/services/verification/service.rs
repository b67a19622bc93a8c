//! Main verification service implementation

use chrono::Duration;
use std::sync::Arc;

use dk_shared::validation::{is_valid_code, mask_email};

use crate::domain::entities::{Challenge, ChallengeFlow};
use crate::domain::value_objects::Email;
use crate::errors::{DomainError, DomainResult, OtpError};
use crate::repositories::UserRepository;

use super::config::VerificationServiceConfig;
use super::generator::{CodeGenerator, SecureCodeGenerator};
use super::templates::MailTemplates;
use super::traits::{Clock, DeliveryOutcome, MailGateway, OutboundMail, SystemClock};
use super::types::IssuedChallenge;

/// Verification service for issuing and checking email one-time codes
pub struct VerificationService<R: UserRepository, M: MailGateway> {
    /// Credential record store
    user_repository: Arc<R>,
    /// Mail transport
    mail_gateway: Arc<M>,
    generator: Arc<dyn CodeGenerator>,
    clock: Arc<dyn Clock>,
    templates: MailTemplates,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<R: UserRepository, M: MailGateway> VerificationService<R, M> {
    /// Create a new verification service using the OS random source and
    /// the wall clock
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Credential record store
    /// * `mail_gateway` - Mail transport implementation
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<R>,
        mail_gateway: Arc<M>,
        config: VerificationServiceConfig,
    ) -> DomainResult<Self> {
        Ok(Self {
            user_repository,
            mail_gateway,
            generator: Arc::new(SecureCodeGenerator::new()),
            clock: Arc::new(SystemClock),
            templates: MailTemplates::new()?,
            config,
        })
    }

    /// Replace the code generator
    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a fresh challenge to an existing account
    ///
    /// This method:
    /// 1. Generates a new code
    /// 2. Computes the expiry from the current time
    /// 3. Stores the challenge, overwriting any previous one
    /// 4. Renders the flow's message and hands it to the mail gateway
    ///
    /// Delivery is best effort: a transport failure is logged and reported in
    /// the result, but issuance still succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedChallenge)` - The stored challenge and the delivery outcome
    /// * `Err(DomainError)` - Invalid address, unknown account or store failure
    pub async fn issue_challenge(
        &self,
        email: &str,
        flow: ChallengeFlow,
    ) -> DomainResult<IssuedChallenge> {
        let email = Email::parse(email)?;
        let masked = mask_email(email.as_str());

        let code = self.generator.generate()?;
        let challenge = Challenge::new(
            code,
            self.clock.now(),
            Duration::minutes(self.config.code_expiration_minutes),
        );

        let stored = self
            .user_repository
            .store_challenge(email.as_str(), &challenge)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store verification code"
                );
                e
            })?;
        if !stored {
            tracing::warn!(
                email = %masked,
                flow = %flow,
                event = "otp_unknown_account",
                "Verification code requested for unknown account"
            );
            return Err(OtpError::NotFound.into());
        }

        tracing::info!(
            email = %masked,
            flow = %flow,
            expires_at = %challenge.expires_at,
            event = "otp_issued",
            "Issued new verification code"
        );

        let html_body = self.templates.render(
            flow,
            &challenge.code,
            &self.config.platform_name,
            self.config.code_expiration_minutes,
        )?;
        let delivery = self
            .mail_gateway
            .send(OutboundMail {
                to: email.as_str().to_string(),
                subject: MailTemplates::subject(flow).to_string(),
                html_body,
            })
            .await;

        match &delivery {
            DeliveryOutcome::Accepted => tracing::debug!(
                email = %masked,
                event = "otp_mail_accepted",
                "Verification mail handed to transport"
            ),
            DeliveryOutcome::Failed { reason } => tracing::warn!(
                email = %masked,
                reason = %reason,
                event = "otp_mail_failed",
                "Verification mail delivery failed"
            ),
        }

        Ok(IssuedChallenge {
            email: email.into_inner(),
            flow,
            challenge,
            delivery,
        })
    }

    /// Verify a submitted code and consume the challenge on success
    ///
    /// This method:
    /// 1. Validates the code format before touching the store
    /// 2. Loads the account and its outstanding challenge
    /// 3. Rejects expired codes, then mismatching codes
    /// 4. Clears the challenge and marks the account verified
    ///
    /// The challenge is cleared before success is returned, so a code can
    /// never be used twice. If another request consumed or replaced the
    /// challenge between the check and the clear, the result is
    /// `NoChallenge`. The consumed challenge is returned.
    pub async fn verify_challenge(&self, email: &str, code: &str) -> DomainResult<Challenge> {
        let email = Email::parse(email)?;
        if !is_valid_code(code) {
            return Err(DomainError::validation(
                "Verification code must be exactly 6 digits",
            ));
        }
        let masked = mask_email(email.as_str());

        let user = self
            .user_repository
            .find_by_email(email.as_str())
            .await?
            .ok_or(OtpError::NotFound)?;

        let challenge = user.challenge.ok_or_else(|| {
            tracing::warn!(
                email = %masked,
                event = "otp_no_challenge",
                "Verification attempted without an outstanding code"
            );
            OtpError::NoChallenge
        })?;

        if challenge.is_expired_at(self.clock.now()) {
            tracing::warn!(
                email = %masked,
                expired_at = %challenge.expires_at,
                event = "otp_expired",
                "Expired verification code submitted"
            );
            return Err(OtpError::Expired.into());
        }

        if !challenge.matches(code) {
            tracing::warn!(
                email = %masked,
                event = "otp_verification_failed",
                "Verification code does not match"
            );
            return Err(OtpError::Mismatch.into());
        }

        let consumed = self
            .user_repository
            .consume_challenge(email.as_str(), &challenge.code)
            .await?;
        if !consumed {
            tracing::warn!(
                email = %masked,
                event = "otp_consume_race",
                "Verification code was consumed or replaced concurrently"
            );
            return Err(OtpError::NoChallenge.into());
        }

        tracing::info!(
            email = %masked,
            event = "otp_verified_success",
            "Verification code successfully verified"
        );

        Ok(challenge)
    }
}
