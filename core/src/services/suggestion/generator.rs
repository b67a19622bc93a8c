//! Text generation collaborator

use async_trait::async_trait;

/// Trait for generative text integration
///
/// Takes a prompt and returns newline-delimited text. Errors are plain
/// strings; the caller decides how to surface them.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}

/// Generator that returns canned text, for development and tests
#[derive(Debug, Clone)]
pub struct StaticTextGenerator {
    response: Result<String, String>,
}

impl StaticTextGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A generator whose every call fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
        }
    }
}

impl Default for StaticTextGenerator {
    fn default() -> Self {
        Self::new("code_wizard\nbyte_smith\nrust_ranger\nstack_tracer\nlambda_lark")
    }
}

#[async_trait]
impl TextGenerator for StaticTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, String> {
        self.response.clone()
    }
}
