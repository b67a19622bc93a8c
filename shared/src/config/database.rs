//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, string_or, ConfigError};

/// Document database configuration for MongoDB connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Name of the database holding the application collections
    pub name: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mongodb://localhost:27017"),
            name: String::from("devkit"),
            max_connections: 10,
            min_connections: 0,
            connect_timeout: 10,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Load from `MONGODB_URL`, `MONGODB_DATABASE`, `MONGODB_MAX_CONNECTIONS`,
    /// `MONGODB_MIN_CONNECTIONS` and `MONGODB_CONNECT_TIMEOUT`
    pub fn from_vars<F>(var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            url: string_or(var, "MONGODB_URL", &defaults.url),
            name: string_or(var, "MONGODB_DATABASE", &defaults.name),
            max_connections: parse_or(var, "MONGODB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_or(var, "MONGODB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout: parse_or(var, "MONGODB_CONNECT_TIMEOUT", defaults.connect_timeout)?,
        })
    }

    /// Use a different database name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}
