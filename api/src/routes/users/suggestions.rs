use actix_web::{web, HttpResponse};

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};

use crate::dto::UsernameSuggestionsResponse;
use crate::handlers::ApiError;
use crate::routes::AppState;

/// Handler for GET /api/v1/users/username-suggestions
///
/// Returns every generated username that is well formed and not already
/// taken. An empty list is a success.
pub async fn username_suggestions<U, M, G>(
    state: web::Data<AppState<U, M, G>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    let usernames = state.suggestion_service.suggest().await?;

    log::debug!("Generated {} username suggestions", usernames.len());

    Ok(HttpResponse::Ok().json(UsernameSuggestionsResponse {
        message: "Username suggestions generated".to_string(),
        usernames,
    }))
}
