//! Username suggestion service

use std::collections::HashSet;
use std::sync::Arc;

use dk_shared::validation::is_valid_username;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::generator::TextGenerator;

/// Name reported in `DomainError::ExternalService`
const SERVICE_NAME: &str = "text-generation";

/// Asks a text generator for candidate usernames and keeps the ones that are
/// well formed and still free
pub struct UsernameSuggestionService<R: UserRepository, G: TextGenerator> {
    user_repository: Arc<R>,
    generator: Arc<G>,
    prompt: String,
}

impl<R: UserRepository, G: TextGenerator> UsernameSuggestionService<R, G> {
    pub fn new(user_repository: Arc<R>, generator: Arc<G>, prompt: impl Into<String>) -> Self {
        Self {
            user_repository,
            generator,
            prompt: prompt.into(),
        }
    }

    /// Produce suggestions, possibly none
    ///
    /// Each generated line is trimmed; blank lines and repeats are dropped.
    /// A candidate survives only if it matches the username format and is not
    /// already taken. Generator failures are not retried.
    pub async fn suggest(&self) -> DomainResult<Vec<String>> {
        let text = self.generator.generate(&self.prompt).await.map_err(|e| {
            tracing::error!(
                error = %e,
                event = "suggestion_generation_failed",
                "Text generation failed"
            );
            DomainError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: e,
            }
        })?;

        let mut seen = HashSet::new();
        let mut usernames = Vec::new();
        let mut rejected = 0usize;

        for candidate in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if !seen.insert(candidate) {
                continue;
            }
            if !is_valid_username(candidate)
                || self.user_repository.exists_by_username(candidate).await?
            {
                rejected += 1;
                continue;
            }
            usernames.push(candidate.to_string());
        }

        tracing::info!(
            accepted = usernames.len(),
            rejected = rejected,
            event = "username_suggestions",
            "Generated username suggestions"
        );

        Ok(usernames)
    }
}
