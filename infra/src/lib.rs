//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the DevKit application,
//! following Clean Architecture principles. It provides concrete implementations
//! of the collaborator traits declared in `dk_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MongoDB connection handling and the user repository
//! - **Mail**: SMTP transport (lettre) and a logging transport for development
//! - **Generation**: Gemini text generation client for username suggestions

// Re-export core types for convenience
pub use dk_core::errors::*;

/// Database module - MongoDB implementations
pub mod database;

/// Mail module - Outbound mail transports
pub mod mail;

/// Generation module - Generative text providers
pub mod generation;

mod error;

pub use error::InfrastructureError;
