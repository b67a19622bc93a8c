//! Error types for the one-time code lifecycle and account management
//!
//! Each variant is a distinct, caller-visible reason. The presentation layer
//! maps them to HTTP statuses and stable error codes.

use thiserror::Error;

/// Failures of challenge issuance and verification
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    /// No account exists for the identity
    #[error("No account exists for this email address")]
    NotFound,

    /// The account has no outstanding code (never issued, or already consumed)
    #[error("No verification code is outstanding for this account")]
    NoChallenge,

    #[error("Verification code has expired")]
    Expired,

    #[error("Verification code does not match")]
    Mismatch,
}

/// Failures of account registration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("An account with this email address already exists")]
    EmailTaken,

    #[error("Username is already taken: {username}")]
    UsernameTaken { username: String },
}
