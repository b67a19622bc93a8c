use actix_web::{web, HttpResponse};
use validator::Validate;

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};
use dk_shared::validation::mask_email;
use dk_shared::MessageResponse;

use crate::dto::RegisterRequest;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an unverified account and mails it a verify-email code.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "dev@example.com",
///     "username": "rust_dev",
///     "password": "correct horse battery"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{ "message": ... }`; `409` when the email or username
/// is taken.
pub async fn register<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    request.validate()?;
    let request = request.into_inner();

    log::info!("Registering account for {}", mask_email(&request.email));

    state
        .account_service
        .register(&request.email, &request.username, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(
        "Account created. A verification code has been sent to your email",
    )))
}
