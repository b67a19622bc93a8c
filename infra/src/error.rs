//! Infrastructure-specific error types

use dk_core::errors::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Document store error
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail transport error: {0}")]
    Mail(String),

    /// Text generation error
    #[error("Text generation error: {0}")]
    Generation(String),

    /// A stored document could not be mapped to a domain entity
    #[error("Invalid stored document: {0}")]
    Mapping(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::persistence(e.to_string()),
            InfrastructureError::Mapping(message) => DomainError::persistence(message),
            InfrastructureError::Http(e) => DomainError::ExternalService {
                service: "http".to_string(),
                message: e.to_string(),
            },
            InfrastructureError::Generation(message) => DomainError::ExternalService {
                service: "text-generation".to_string(),
                message,
            },
            InfrastructureError::Config(message) | InfrastructureError::Mail(message) => {
                DomainError::Internal { message }
            }
        }
    }
}
