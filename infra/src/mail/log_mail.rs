//! Development mail transport

use async_trait::async_trait;

use dk_core::services::verification::{DeliveryOutcome, MailGateway, OutboundMail};
use dk_shared::validation::mask_email;

/// Accepts every message and logs the hand-off without the body
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailGateway;

impl LogMailGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailGateway for LogMailGateway {
    async fn send(&self, mail: OutboundMail) -> DeliveryOutcome {
        tracing::info!(
            to = %mask_email(&mail.to),
            subject = %mail.subject,
            body_bytes = mail.html_body.len(),
            event = "mail_logged",
            "Mail transport disabled; message not sent"
        );
        DeliveryOutcome::Accepted
    }
}
