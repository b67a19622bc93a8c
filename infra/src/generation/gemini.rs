//! Gemini text generation client
//!
//! Calls the `generateContent` REST endpoint once per request. There is no
//! retry; a failed call fails the suggestion flow.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use dk_core::services::suggestion::TextGenerator;
use dk_shared::GeminiSettings;

use crate::InfrastructureError;

/// Gemini API client
#[derive(Clone)]
pub struct GeminiTextGenerator {
    client: Client,
    api_key: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiTextGenerator {
    /// Create a client; the API key is required
    pub fn new(settings: &GeminiSettings) -> Result<Self, InfrastructureError> {
        if settings.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "GEMINI_API_KEY must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let url = format!(
            "{}/models/{}:generateContent",
            settings.endpoint.trim_end_matches('/'),
            settings.model
        );

        tracing::info!(
            model = %settings.model,
            event = "gemini_configured",
            "Gemini text generator initialized"
        );

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            url,
        })
    }

    async fn request(&self, prompt: &str) -> Result<String, InfrastructureError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::Generation(format!(
                "Gemini returned HTTP {}",
                status.as_u16()
            )));
        }

        let parsed: GenerateResponse = response.json().await?;
        extract_text(parsed)
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String, InfrastructureError> {
    let content = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or_else(|| InfrastructureError::Generation("Gemini returned no candidates".to_string()))?;

    Ok(content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        self.request(prompt).await.map_err(|e| {
            // reqwest errors carry the URL, which includes the key
            let message = match e {
                InfrastructureError::Http(e) => e.without_url().to_string(),
                other => other.to_string(),
            };
            tracing::warn!(
                error = %message,
                event = "gemini_request_failed",
                "Gemini request failed"
            );
            message
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: &str) -> GeminiSettings {
        GeminiSettings {
            api_key: api_key.to_string(),
            model: "gemini-1.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(
            GeminiTextGenerator::new(&settings("  ")),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_builds_model_url() {
        let generator = GeminiTextGenerator::new(&settings("key")).unwrap();
        assert_eq!(
            generator.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "code_wizard\nbyte_" }, { "text": "smith\n" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "code_wizard\nbyte_smith\n");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let response: GenerateResponse =
            serde_json::from_value(serde_json::json!({ "promptFeedback": {} })).unwrap();

        assert!(matches!(
            extract_text(response),
            Err(InfrastructureError::Generation(_))
        ));
    }
}
