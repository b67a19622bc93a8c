//! Configuration for the verification service

use crate::domain::entities::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Product name shown in outgoing mail
    pub platform_name: String,
}

impl VerificationServiceConfig {
    pub fn with_platform_name(mut self, platform_name: impl Into<String>) -> Self {
        self.platform_name = platform_name.into();
        self
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            platform_name: "DevKit".to_string(),
        }
    }
}
