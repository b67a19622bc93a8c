//! Domain entities representing core business objects.

pub mod challenge;
pub mod user;

// Re-export commonly used types
pub use challenge::{Challenge, ChallengeFlow, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
pub use user::User;
