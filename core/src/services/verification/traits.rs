//! Traits for mail delivery and time source integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A rendered message ready for transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// What the transport said about a hand-off
///
/// `Accepted` means the message was handed to the transport, not that it
/// reached the recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Accepted,
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DeliveryOutcome::Accepted)
    }
}

/// Trait for mail transport integration
///
/// Best effort: implementations report failures through `DeliveryOutcome`
/// and never return an error.
#[async_trait]
pub trait MailGateway: Send + Sync {
    async fn send(&self, mail: OutboundMail) -> DeliveryOutcome;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
