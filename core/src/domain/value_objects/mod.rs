//! Value objects representing immutable domain concepts.

pub mod email;

// Re-export commonly used types
pub use email::Email;
