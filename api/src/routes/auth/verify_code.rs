use actix_web::{web, HttpResponse};
use validator::Validate;

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};
use dk_shared::validation::mask_email;
use dk_shared::MessageResponse;

use crate::dto::VerifyCodeRequest;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/verify-code
///
/// Consumes the outstanding code and marks the account verified.
///
/// # Errors
///
/// - `404 user_not_found` - no account for the email
/// - `400 no_challenge` - nothing outstanding, or already used
/// - `410 code_expired`
/// - `401 code_mismatch`
pub async fn verify_code<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<VerifyCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    request.validate()?;

    state
        .verification_service
        .verify_challenge(&request.email, &request.code)
        .await
        .map_err(|e| {
            log::warn!("Verification failed for {}: {}", mask_email(&request.email), e);
            e
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Email verified successfully")))
}
