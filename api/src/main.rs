use actix_web::{web, HttpServer};
use log::{error, info};
use std::io;
use std::sync::Arc;

use dk_api::app::create_app;
use dk_api::config::HttpConfig;
use dk_api::routes::AppState;
use dk_core::services::{
    AccountService, AccountServiceConfig, UsernameSuggestionService, VerificationService,
    VerificationServiceConfig,
};
use dk_infra::database::{DatabaseConnection, MongoUserRepository};
use dk_infra::generation::create_text_generator;
use dk_infra::mail::create_mail_transport;
use dk_shared::AppConfig;

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, error);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let default_filter = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let config = config.map_err(|e| startup_error("Invalid configuration", e))?;

    info!(
        "Starting DevKit API Server ({} environment)",
        config.environment
    );

    let connection = DatabaseConnection::connect(&config.database)
        .await
        .map_err(|e| startup_error("Failed to connect to MongoDB", e))?;
    connection
        .ping()
        .await
        .map_err(|e| startup_error("MongoDB is not reachable", e))?;
    connection
        .ensure_indexes()
        .await
        .map_err(|e| startup_error("Failed to create indexes", e))?;

    let user_repository = Arc::new(MongoUserRepository::new(&connection));
    let mail_transport = Arc::new(
        create_mail_transport(&config.mail)
            .map_err(|e| startup_error("Failed to configure mail transport", e))?,
    );
    let text_generator = Arc::new(
        create_text_generator(&config.suggestion)
            .map_err(|e| startup_error("Failed to configure text generation", e))?,
    );

    let verification_service = Arc::new(
        VerificationService::new(
            user_repository.clone(),
            mail_transport,
            VerificationServiceConfig::default().with_platform_name(&config.mail.platform_name),
        )
        .map_err(|e| startup_error("Failed to load mail templates", e))?,
    );
    let account_service = Arc::new(AccountService::new(
        user_repository.clone(),
        verification_service.clone(),
        AccountServiceConfig::default(),
    ));
    let suggestion_service = Arc::new(UsernameSuggestionService::new(
        user_repository,
        text_generator,
        config.suggestion.prompt.clone(),
    ));

    let app_state = web::Data::new(AppState {
        verification_service,
        account_service,
        suggestion_service,
    });

    let http_config = HttpConfig::from_env(config.environment)
        .with_max_payload_size(config.server.max_payload_size);
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone(), &http_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
