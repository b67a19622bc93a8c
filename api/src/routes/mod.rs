//! Route handlers and the state they share

pub mod auth;
pub mod users;

use std::sync::Arc;

use dk_core::repositories::UserRepository;
use dk_core::services::{
    AccountService, MailGateway, TextGenerator, UsernameSuggestionService, VerificationService,
};

/// Application state that holds shared services
pub struct AppState<U, M, G>
where
    U: UserRepository,
    M: MailGateway,
    G: TextGenerator,
{
    pub verification_service: Arc<VerificationService<U, M>>,
    pub account_service: Arc<AccountService<U, M>>,
    pub suggestion_service: Arc<UsernameSuggestionService<U, G>>,
}
