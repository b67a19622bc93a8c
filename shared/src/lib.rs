//! Shared utilities and common types for the DevKit server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error and response structures used on the wire
//! - Validation helpers (email, username, one-time code, password)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DatabaseConfig, Environment, LoggingConfig, MailConfig,
    GeminiSettings, MailProvider, ServerConfig, SmtpSettings, SuggestionConfig, SuggestionProvider,
    DEFAULT_PROMPT,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse};
pub use utils::validation;
