//! HTTP-layer configuration: CORS and security middleware settings
//!
//! Read once at startup and passed to the middleware factories, so the
//! middleware itself never touches the process environment.

use dk_shared::Environment;

const DEFAULT_MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Extra origins allowed in production (`ALLOWED_ORIGINS`, comma separated)
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime in seconds (`CORS_MAX_AGE`)
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

/// Security middleware settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Proxies whose `X-Forwarded-Proto` is trusted (`TRUSTED_PROXIES`)
    pub trusted_proxies: Vec<String>,
}

/// Everything the application factory needs besides the services
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub environment: Environment,
    pub cors: CorsConfig,
    pub security: SecurityConfig,
    /// Largest accepted JSON body in bytes
    pub max_payload_size: usize,
}

impl HttpConfig {
    /// Development defaults, permissive CORS and no HTTPS enforcement
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cors: CorsConfig::default(),
            security: SecurityConfig::default(),
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }

    pub fn with_max_payload_size(mut self, bytes: usize) -> Self {
        self.max_payload_size = bytes;
        self
    }

    pub fn from_env(environment: Environment) -> Self {
        Self::from_vars(environment, |key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(environment: Environment, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_age = var("CORS_MAX_AGE")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(CorsConfig::default().max_age);

        Self {
            environment,
            cors: CorsConfig {
                allowed_origins: split_list(var("ALLOWED_ORIGINS")),
                max_age,
            },
            security: SecurityConfig {
                trusted_proxies: split_list(var("TRUSTED_PROXIES")),
            },
            max_payload_size: DEFAULT_MAX_PAYLOAD_SIZE,
        }
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
