//! Application factory
//!
//! Builds the actix-web `App` from already-constructed services so the same
//! wiring serves the binary and the handler tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use dk_core::repositories::UserRepository;
use dk_core::services::{MailGateway, TextGenerator};
use dk_shared::{error_codes, ErrorResponse, HealthResponse};

use crate::config::HttpConfig;
use crate::handlers::{json_error_handler, query_error_handler};
use crate::middleware::{create_cors, SecurityMiddleware};
use crate::routes::{auth, users, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, M, G>(
    app_state: web::Data<AppState<U, M, G>>,
    config: &HttpConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: MailGateway + 'static,
    G: TextGenerator + 'static,
{
    let cors = create_cors(config.environment, &config.cors);
    let security = SecurityMiddleware::new(config.environment, &config.security);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Last wrapped runs first: security, then CORS, then logging
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register::<U, M, G>))
                        .route("/send-code", web::post().to(auth::send_code::<U, M, G>))
                        .route("/verify-code", web::post().to(auth::verify_code::<U, M, G>))
                        .route(
                            "/reset-password",
                            web::post().to(auth::reset_password::<U, M, G>),
                        ),
                )
                .service(
                    web::scope("/users")
                        .route(
                            "/username-suggestions",
                            web::get().to(users::username_suggestions::<U, M, G>),
                        )
                        .route(
                            "/username-available",
                            web::get().to(users::username_available::<U, M, G>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "devkit-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
