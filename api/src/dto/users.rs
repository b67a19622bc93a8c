//! User lookup bodies

use serde::{Deserialize, Serialize};

/// Response for `GET /users/username-suggestions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameSuggestionsResponse {
    pub message: String,
    /// Well-formed usernames that were free when checked
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsernameAvailableQuery {
    pub username: String,
}

/// Response for `GET /users/username-available`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsernameAvailableResponse {
    pub username: String,
    pub available: bool,
}
