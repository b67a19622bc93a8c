//! SMTP Mail Transport Implementation
//!
//! Sends rendered HTML messages through an SMTP relay using lettre. The
//! transport is synchronous, so each send runs on tokio's blocking pool.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

use dk_core::services::verification::{DeliveryOutcome, MailGateway, OutboundMail};
use dk_shared::validation::mask_email;
use dk_shared::SmtpSettings;

use crate::InfrastructureError;

/// SMTP mail gateway
#[derive(Clone)]
pub struct SmtpMailGateway {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailGateway {
    /// Build the relay transport and sender mailbox
    ///
    /// No connection is opened here; the relay is contacted on each send.
    pub fn new(settings: &SmtpSettings) -> Result<Self, InfrastructureError> {
        let builder = if settings.starttls {
            SmtpTransport::starttls_relay(&settings.host)
        } else {
            SmtpTransport::relay(&settings.host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay: {}", e)))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(settings.timeout_secs)))
            .build();

        let from = sender_mailbox(settings)?;

        tracing::info!(
            host = %settings.host,
            port = settings.port,
            from = %mask_email(&settings.from_email),
            event = "smtp_configured",
            "SMTP mail transport initialized"
        );

        Ok(Self { transport, from })
    }

    fn build_message(&self, mail: &OutboundMail) -> Result<Message, InfrastructureError> {
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))
    }

    async fn deliver(&self, mail: &OutboundMail) -> Result<(), InfrastructureError> {
        let message = self.build_message(mail)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| InfrastructureError::Mail(format!("Failed to send email: {}", e)))
        })
        .await
        .map_err(|e| InfrastructureError::Mail(format!("Task join error: {}", e)))?
    }
}

/// `"Name <address>"` mailbox for the configured sender
fn sender_mailbox(settings: &SmtpSettings) -> Result<Mailbox, InfrastructureError> {
    let address = settings
        .from_email
        .parse()
        .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;
    Ok(Mailbox::new(Some(settings.from_name.clone()), address))
}

#[async_trait]
impl MailGateway for SmtpMailGateway {
    async fn send(&self, mail: OutboundMail) -> DeliveryOutcome {
        let to = mask_email(&mail.to);
        match self.deliver(&mail).await {
            Ok(()) => {
                tracing::info!(
                    to = %to,
                    subject = %mail.subject,
                    event = "mail_sent",
                    "Mail accepted by SMTP relay"
                );
                DeliveryOutcome::Accepted
            }
            Err(e) => {
                tracing::warn!(
                    to = %to,
                    error = %e,
                    event = "mail_send_failed",
                    "SMTP delivery failed"
                );
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 465,
            username: "mailer@example.com".to_string(),
            password: "secret".to_string(),
            from_email: "no-reply@example.com".to_string(),
            from_name: "DevKit".to_string(),
            starttls: false,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_builds_html_message() {
        let gateway = SmtpMailGateway::new(&settings()).unwrap();

        let message = gateway
            .build_message(&OutboundMail {
                to: "user@example.com".to_string(),
                subject: "Verify your email address".to_string(),
                html_body: "<p>007042</p>".to_string(),
            })
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("To: user@example.com"));
        assert!(raw.contains("Subject: Verify your email address"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("007042"));
    }

    #[test]
    fn test_invalid_sender_is_config_error() {
        let mut settings = settings();
        settings.from_email = "not an address".to_string();

        assert!(matches!(
            SmtpMailGateway::new(&settings),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_reported_not_raised() {
        let gateway = SmtpMailGateway::new(&settings()).unwrap();

        let outcome = gateway
            .send(OutboundMail {
                to: "not an address".to_string(),
                subject: "Verify your email address".to_string(),
                html_body: String::new(),
            })
            .await;

        assert!(matches!(outcome, DeliveryOutcome::Failed { .. }));
    }
}
