//! Type definitions shared by the API layer
//!
//! - `response` - success response bodies and health checks

pub mod response;

pub use response::{HealthResponse, MessageResponse};
