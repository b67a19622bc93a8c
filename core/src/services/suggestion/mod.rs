//! Username suggestion flow backed by a generative text collaborator

mod generator;
mod service;


pub use generator::{StaticTextGenerator, TextGenerator};
pub use service::UsernameSuggestionService;
