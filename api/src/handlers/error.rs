//! Domain error to HTTP response mapping
//!
//! Every failure reason that reaches a handler is turned into a status and a
//! stable `code` here, so callers can tell the verification failures apart.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use std::collections::HashMap;
use std::fmt;
use validator::ValidationErrors;

use dk_core::errors::{AccountError, DomainError, OtpError};
use dk_shared::{error_codes, ErrorResponse};

/// Error returned by every handler
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse::new(code, error),
        }
    }

    /// The response body this error renders to
    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.body.error, self.body.code)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let (status, code) = match &error {
            DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            DomainError::Otp(otp) => match otp {
                OtpError::NotFound => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
                OtpError::NoChallenge => (StatusCode::BAD_REQUEST, error_codes::NO_CHALLENGE),
                OtpError::Expired => (StatusCode::GONE, error_codes::CODE_EXPIRED),
                OtpError::Mismatch => (StatusCode::UNAUTHORIZED, error_codes::CODE_MISMATCH),
            },
            DomainError::Account(account) => match account {
                AccountError::EmailTaken => (StatusCode::CONFLICT, error_codes::EMAIL_TAKEN),
                AccountError::UsernameTaken { .. } => {
                    (StatusCode::CONFLICT, error_codes::USERNAME_TAKEN)
                }
            },
            DomainError::Persistence { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, error_codes::DATABASE_ERROR)
            }
            DomainError::ExternalService { .. } => {
                (StatusCode::BAD_GATEWAY, error_codes::EXTERNAL_SERVICE_ERROR)
            }
            DomainError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        };

        // Server-side details stay in the log; the client gets a generic reason
        let message = if status.is_server_error() {
            log::error!("Request failed: {}", error);
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Storage is temporarily unavailable".to_string(),
                StatusCode::BAD_GATEWAY => "Text generation service failed".to_string(),
                _ => "An internal error occurred".to_string(),
            }
        } else {
            log::debug!("Request rejected: {}", error);
            error.to_string()
        };

        Self::new(status, code, message)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: HashMap<String, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
                .with_fields(fields),
        }
    }
}

/// Render malformed JSON bodies in the common error shape
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected request body: {}", error);
    let status = match &error {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    ApiError::new(status, error_codes::VALIDATION_ERROR, error.to_string()).into()
}

/// Render unparseable query strings in the common error shape
pub fn query_error_handler(error: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected query string: {}", error);
    ApiError::new(
        StatusCode::BAD_REQUEST,
        error_codes::VALIDATION_ERROR,
        error.to_string(),
    )
    .into()
}
