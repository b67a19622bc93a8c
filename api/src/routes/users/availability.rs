use actix_web::{web, HttpResponse};

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};

use crate::dto::{UsernameAvailableQuery, UsernameAvailableResponse};
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for GET /api/v1/users/username-available?username=...
///
/// A malformed username is rejected with `400` rather than reported as
/// unavailable.
pub async fn username_available<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
    query: web::Query<UsernameAvailableQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    let UsernameAvailableQuery { username } = query.into_inner();
    let available = state.account_service.username_available(&username).await?;

    Ok(HttpResponse::Ok().json(UsernameAvailableResponse {
        username,
        available,
    }))
}
