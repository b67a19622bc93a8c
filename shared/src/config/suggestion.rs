//! Username suggestion (generative text) configuration

use serde::{Deserialize, Serialize};

use super::{parse_or, required, string_or, ConfigError};

/// Default prompt sent to the text generation service
pub const DEFAULT_PROMPT: &str = "Suggest 10 unique usernames for a software developer. \
Use only lowercase letters, digits and underscores, between 3 and 20 characters. \
Return one username per line with no numbering or extra text.";

/// Which text generator backs username suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionProvider {
    /// Fixed candidate list, for development
    #[default]
    Static,
    /// Google Gemini `generateContent` API
    Gemini,
}

impl std::str::FromStr for SuggestionProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" | "mock" => Ok(SuggestionProvider::Static),
            "gemini" => Ok(SuggestionProvider::Gemini),
            _ => Err(format!("Invalid suggestion provider: {}", s)),
        }
    }
}

/// Gemini API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiSettings {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

/// Username suggestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuggestionConfig {
    pub provider: SuggestionProvider,

    /// Present only when `provider` is `Gemini`
    #[serde(default)]
    pub gemini: Option<GeminiSettings>,

    /// Prompt sent on every suggestion request
    pub prompt: String,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            provider: SuggestionProvider::Static,
            gemini: None,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl SuggestionConfig {
    /// Load from `SUGGESTION_PROVIDER`, `SUGGESTION_PROMPT` and, for Gemini,
    /// `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_ENDPOINT`, `GEMINI_TIMEOUT_SECS`
    pub fn from_vars<F>(var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = parse_or(var, "SUGGESTION_PROVIDER", SuggestionProvider::Static)?;

        let gemini = match provider {
            SuggestionProvider::Static => None,
            SuggestionProvider::Gemini => Some(GeminiSettings {
                api_key: required(var, "GEMINI_API_KEY")?,
                model: string_or(var, "GEMINI_MODEL", "gemini-1.5-flash"),
                endpoint: string_or(
                    var,
                    "GEMINI_ENDPOINT",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
                timeout_secs: parse_or(var, "GEMINI_TIMEOUT_SECS", 20)?,
            }),
        };

        Ok(Self {
            provider,
            gemini,
            prompt: string_or(var, "SUGGESTION_PROMPT", DEFAULT_PROMPT),
        })
    }
}
