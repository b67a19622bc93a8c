use actix_web::{web, HttpResponse};
use validator::Validate;

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};
use dk_shared::MessageResponse;

use crate::dto::ResetPasswordRequest;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/reset-password
///
/// Same failure reasons as `verify-code`; the password only changes once the
/// code has been consumed.
pub async fn reset_password<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    request.validate()?;

    state
        .account_service
        .reset_password(&request.email, &request.code, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")))
}
