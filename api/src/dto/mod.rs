//! Request and response bodies

pub mod auth;
pub mod users;

pub use auth::{RegisterRequest, ResetPasswordRequest, SendCodeRequest, VerifyCodeRequest};
pub use users::{UsernameAvailableQuery, UsernameAvailableResponse, UsernameSuggestionsResponse};
