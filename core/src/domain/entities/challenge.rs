//! One-time code challenge attached to a user's credential record.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

pub use dk_shared::validation::CODE_LENGTH;

/// Validity window of an issued code, for both flows
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Why a challenge is being issued
///
/// Both flows produce the same code format and share the record's single
/// challenge slot; they differ only in the message copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeFlow {
    VerifyEmail,
    ResetPassword,
}

impl ChallengeFlow {
    /// Wire name of the flow
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeFlow::VerifyEmail => "verify-email",
            ChallengeFlow::ResetPassword => "reset-password",
        }
    }
}

impl std::fmt::Display for ChallengeFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outstanding `{code, expiry}` pair
///
/// The code and its expiry live in one value so a record can never hold one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Six ASCII digits, zero padded
    pub code: String,

    /// Instant after which the code is no longer acceptable
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    /// Create a challenge issued at `issued_at`, valid for `validity`
    pub fn new(code: String, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            code,
            expires_at: issued_at + validity,
        }
    }

    /// Whether the code is past its expiry at `now`
    ///
    /// The expiry instant itself is still inside the window.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Exact comparison against a submitted code, in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Time remaining until expiration at `now`, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
