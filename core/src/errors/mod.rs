//! Domain-specific error types and error handling.

mod types;

pub use types::{AccountError, OtpError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed input, rejected before touching persistence
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The persistence layer failed or was unreachable
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// A called-out service (text generation) failed
    #[error("External service error ({service}): {message}")]
    ExternalService { service: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

impl DomainError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a persistence failure
    pub fn persistence(message: impl Into<String>) -> Self {
        DomainError::Persistence {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
