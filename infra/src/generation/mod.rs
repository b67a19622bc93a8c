//! Generative text providers for username suggestions

pub mod gemini;

use async_trait::async_trait;

use dk_core::services::suggestion::{StaticTextGenerator, TextGenerator};
use dk_shared::{SuggestionConfig, SuggestionProvider};

pub use gemini::GeminiTextGenerator;

use crate::InfrastructureError;

/// The configured text generator
pub enum SuggestionGenerator {
    Static(StaticTextGenerator),
    Gemini(GeminiTextGenerator),
}

#[async_trait]
impl TextGenerator for SuggestionGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        match self {
            SuggestionGenerator::Static(generator) => generator.generate(prompt).await,
            SuggestionGenerator::Gemini(generator) => generator.generate(prompt).await,
        }
    }
}

/// Create a text generator based on configuration
pub fn create_text_generator(
    config: &SuggestionConfig,
) -> Result<SuggestionGenerator, InfrastructureError> {
    match config.provider {
        SuggestionProvider::Static => Ok(SuggestionGenerator::Static(StaticTextGenerator::default())),
        SuggestionProvider::Gemini => {
            let settings = config.gemini.as_ref().ok_or_else(|| {
                InfrastructureError::Config(
                    "Gemini provider selected without an API key".to_string(),
                )
            })?;
            Ok(SuggestionGenerator::Gemini(GeminiTextGenerator::new(settings)?))
        }
    }
}
