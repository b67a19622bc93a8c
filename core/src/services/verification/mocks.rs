//! In-memory collaborators for testing the verification flows

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

use super::traits::{Clock, DeliveryOutcome, MailGateway, OutboundMail};

/// Mail gateway that records every message it is handed
pub struct RecordingMailGateway {
    sent: Mutex<Vec<OutboundMail>>,
    should_fail: bool,
}

impl RecordingMailGateway {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail,
        }
    }

    /// Every message handed to the gateway, including failed ones
    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last_sent_to(&self, to: &str) -> Option<OutboundMail> {
        self.sent().into_iter().rev().find(|mail| mail.to == to)
    }
}

impl Default for RecordingMailGateway {
    fn default() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl MailGateway for RecordingMailGateway {
    async fn send(&self, mail: OutboundMail) -> DeliveryOutcome {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(mail);
        }
        if self.should_fail {
            return DeliveryOutcome::Failed {
                reason: "Mock transport error".to_string(),
            };
        }
        DeliveryOutcome::Accepted
    }
}

/// Clock that only moves when told to
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut current) = self.now.lock() {
            *current = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut current) = self.now.lock() {
            *current = *current + by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_else(|e| *e.into_inner())
    }
}
