//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, required, string_or, ConfigError};

/// Which mail transport to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Write messages to the log instead of sending them
    #[default]
    Log,
    /// Relay messages through an SMTP server
    Smtp,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" | "mock" => Ok(MailProvider::Log),
            "smtp" => Ok(MailProvider::Smtp),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// SMTP relay credentials and sender identity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    /// STARTTLS on the submission port instead of implicit TLS
    #[serde(default)]
    pub starttls: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Mail transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,

    /// Present only when `provider` is `Smtp`
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,

    /// Product name shown in message copy
    pub platform_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Log,
            smtp: None,
            platform_name: String::from("DevKit"),
        }
    }
}

impl MailConfig {
    /// Load from `MAIL_PROVIDER`, `PLATFORM_NAME` and, for SMTP,
    /// `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`,
    /// `SMTP_FROM_EMAIL`, `SMTP_FROM_NAME`, `SMTP_STARTTLS`, `SMTP_TIMEOUT_SECS`
    ///
    /// Missing SMTP credentials are a startup error when SMTP is selected.
    pub fn from_vars<F>(var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = parse_or(var, "MAIL_PROVIDER", MailProvider::Log)?;
        let platform_name = string_or(var, "PLATFORM_NAME", "DevKit");

        let smtp = match provider {
            MailProvider::Log => None,
            MailProvider::Smtp => {
                let host = required(var, "SMTP_HOST")?;
                let username = required(var, "SMTP_USERNAME")?;
                let from_email = var("SMTP_FROM_EMAIL").unwrap_or_else(|| username.clone());
                Some(SmtpSettings {
                    host,
                    port: parse_or(var, "SMTP_PORT", 465)?,
                    password: required(var, "SMTP_PASSWORD")?,
                    username,
                    from_email,
                    from_name: string_or(var, "SMTP_FROM_NAME", &platform_name),
                    starttls: parse_or(var, "SMTP_STARTTLS", false)?,
                    timeout_secs: parse_or(var, "SMTP_TIMEOUT_SECS", default_timeout_secs())?,
                })
            }
        };

        Ok(Self {
            provider,
            smtp,
            platform_name,
        })
    }
}

fn default_timeout_secs() -> u64 {
    30
}
