//! Verification service module for email one-time codes
//!
//! This module provides the complete challenge lifecycle:
//! - Secure code generation
//! - Issuance with a fixed validity window and best-effort delivery
//! - Verification with single-use consumption

mod config;
mod generator;
mod service;
mod templates;
mod traits;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use generator::{CodeGenerator, SecureCodeGenerator};
pub use service::VerificationService;
pub use templates::MailTemplates;
pub use traits::{Clock, DeliveryOutcome, MailGateway, OutboundMail, SystemClock};
pub use types::IssuedChallenge;

#[cfg(any(test, feature = "test-utils"))]
pub use generator::SequenceCodeGenerator;
