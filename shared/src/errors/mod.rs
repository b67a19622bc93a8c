//! Shared error response structure and error codes

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error body returned by every API endpoint on failure
///
/// `error` is the human readable reason, `code` is stable and meant for
/// clients to branch on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,

    pub code: String,

    /// Field-level validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, Vec<String>>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            fields: None,
        }
    }

    /// Attach field-level validation messages
    pub fn with_fields(mut self, fields: HashMap<String, Vec<String>>) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Error codes used across the application
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const NO_CHALLENGE: &str = "no_challenge";
    pub const CODE_EXPIRED: &str = "code_expired";
    pub const CODE_MISMATCH: &str = "code_mismatch";
    pub const EMAIL_TAKEN: &str = "email_taken";
    pub const USERNAME_TAKEN: &str = "username_taken";
    pub const DATABASE_ERROR: &str = "database_error";
    pub const EXTERNAL_SERVICE_ERROR: &str = "external_service_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const HTTPS_REQUIRED: &str = "https_required";
    pub const INVALID_ORIGIN: &str = "invalid_origin";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse::new("code_expired", "Code expired")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Code expired", "code": "code_expired" })
        );
    }
}
