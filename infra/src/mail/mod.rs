//! Mail Transport Module
//!
//! This module provides implementations of the core `MailGateway` trait:
//!
//! - **SMTP**: Production delivery through an SMTP relay (lettre)
//! - **Log**: Development transport that only records the hand-off
//!
//! Both are best effort. Failures are returned as `DeliveryOutcome::Failed`
//! and never as errors.

pub mod log_mail;
pub mod smtp;

use async_trait::async_trait;

use dk_core::services::verification::{DeliveryOutcome, MailGateway, OutboundMail};
use dk_shared::{MailConfig, MailProvider};

pub use log_mail::LogMailGateway;
pub use smtp::SmtpMailGateway;

use crate::InfrastructureError;

/// The configured transport
pub enum MailTransport {
    Log(LogMailGateway),
    Smtp(SmtpMailGateway),
}

#[async_trait]
impl MailGateway for MailTransport {
    async fn send(&self, mail: OutboundMail) -> DeliveryOutcome {
        match self {
            MailTransport::Log(gateway) => gateway.send(mail).await,
            MailTransport::Smtp(gateway) => gateway.send(mail).await,
        }
    }
}

/// Create a mail transport based on configuration
///
/// Credentials are checked here so a misconfigured deployment fails at
/// startup instead of on the first send.
pub fn create_mail_transport(config: &MailConfig) -> Result<MailTransport, InfrastructureError> {
    match config.provider {
        MailProvider::Log => Ok(MailTransport::Log(LogMailGateway::new())),
        MailProvider::Smtp => {
            let settings = config.smtp.as_ref().ok_or_else(|| {
                InfrastructureError::Config("SMTP provider selected without SMTP settings".to_string())
            })?;
            Ok(MailTransport::Smtp(SmtpMailGateway::new(settings)?))
        }
    }
}
