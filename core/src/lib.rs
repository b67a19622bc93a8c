//! # DevKit Core
//!
//! Core business logic and domain layer for the DevKit backend.
//! This crate contains the user and challenge entities, the one-time code
//! lifecycle, account and username-suggestion services, repository
//! interfaces, and error types that form the foundation of the application.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Challenge, ChallengeFlow, Email, User};
pub use errors::{AccountError, DomainError, DomainResult, OtpError};
pub use repositories::UserRepository;
pub use services::{
    AccountService, MailGateway, TextGenerator, UsernameSuggestionService, VerificationService,
};
