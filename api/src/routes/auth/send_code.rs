use actix_web::{web, HttpResponse};
use validator::Validate;

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};
use dk_shared::validation::mask_email;
use dk_shared::MessageResponse;

use crate::dto::SendCodeRequest;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a fresh code for `flow`, replacing any outstanding one. The
/// response does not depend on whether the mail was accepted.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "dev@example.com",
///     "flow": "verify-email"
/// }
/// ```
pub async fn send_code<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<SendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    request.validate()?;

    log::info!(
        "Sending {} code to {}",
        request.flow,
        mask_email(&request.email)
    );

    state
        .verification_service
        .issue_challenge(&request.email, request.flow)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Verification code sent")))
}
