//! Username lookup handlers

pub mod availability;
pub mod suggestions;

pub use availability::username_available;
pub use suggestions::username_suggestions;
