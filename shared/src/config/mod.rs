//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - MongoDB connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound mail transport configuration
//! - `server` - HTTP server configuration
//! - `suggestion` - Generative text service used for username suggestions
//!
//! Every section can be read from the process environment with `from_env()`
//! or from any key lookup with `from_vars()`, which keeps tests free of
//! global environment mutation.

pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod suggestion;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use mail::{MailConfig, MailProvider, SmtpSettings};
pub use server::ServerConfig;
pub use suggestion::{GeminiSettings, SuggestionConfig, SuggestionProvider, DEFAULT_PROMPT};

/// Startup configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// Username suggestion configuration
    pub suggestion: SuggestionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_vars(&var);

        Ok(Self {
            environment,
            server: ServerConfig::from_vars(&var)?,
            database: DatabaseConfig::from_vars(&var)?,
            mail: MailConfig::from_vars(&var)?,
            suggestion: SuggestionConfig::from_vars(&var)?,
            logging: LoggingConfig::for_environment(environment),
        })
    }
}

/// Read a required key
pub(crate) fn required<F>(var: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

/// Read a key, falling back to a default when absent
pub(crate) fn string_or<F>(var: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var(key).unwrap_or_else(|| default.to_string())
}

/// Parse a key, falling back to a default when absent
///
/// A present but unparsable value is an error rather than a silent default.
pub(crate) fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_log_mail_and_static_suggestions() {
        let config = AppConfig::from_vars(lookup(&[])).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.mail.provider, MailProvider::Log);
        assert_eq!(config.suggestion.provider, SuggestionProvider::Static);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_smtp_provider_requires_credentials() {
        let result = AppConfig::from_vars(lookup(&[("MAIL_PROVIDER", "smtp")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("SMTP_HOST"));
    }

    #[test]
    fn test_gemini_provider_requires_api_key() {
        let result = AppConfig::from_vars(lookup(&[("SUGGESTION_PROVIDER", "gemini")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("GEMINI_API_KEY"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = AppConfig::from_vars(lookup(&[("SERVER_PORT", "eighty")]));
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::Invalid { key: "SERVER_PORT", .. }
        ));
    }
}
