//! Authentication request bodies
//!
//! Shape checks happen here with `validator`; the services re-check the same
//! rules, so a request that slips past a DTO still fails with a validation
//! error.

use serde::{Deserialize, Serialize};
use validator::Validate;

use dk_core::domain::entities::ChallengeFlow;
use dk_shared::validation::{CODE_REGEX, USERNAME_REGEX};

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-20 characters of lowercase letters, digits or underscores"
    ))]
    pub username: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Request to issue a fresh code for either flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    pub flow: ChallengeFlow,
}

/// Request to verify an email address with a code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(regex(path = *CODE_REGEX, message = "Code must be exactly 6 digits"))]
    pub code: String,
}

/// Request to set a new password with a reset code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(regex(path = *CODE_REGEX, message = "Code must be exactly 6 digits"))]
    pub code: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "dev@example.com".to_string(),
            username: "rust_dev".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = RegisterRequest {
            email: "not-an-email".to_string(),
            username: "No".to_string(),
            password: "short".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_verify_code_requires_six_digits() {
        let request = |code: &str| VerifyCodeRequest {
            email: "dev@example.com".to_string(),
            code: code.to_string(),
        };

        assert!(request("007042").validate().is_ok());
        assert!(request("7042").validate().is_err());
        assert!(request("12345a").validate().is_err());
        assert!(request("1234567").validate().is_err());
    }

    #[test]
    fn test_send_code_flow_wire_names() {
        let request: SendCodeRequest = serde_json::from_value(serde_json::json!({
            "email": "dev@example.com",
            "flow": "reset-password"
        }))
        .unwrap();
        assert_eq!(request.flow, ChallengeFlow::ResetPassword);

        let unknown = serde_json::from_value::<SendCodeRequest>(serde_json::json!({
            "email": "dev@example.com",
            "flow": "login"
        }));
        assert!(unknown.is_err());
    }
}
