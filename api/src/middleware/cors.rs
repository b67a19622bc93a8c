//! CORS configuration for browser clients
//!
//! Development allows any origin. Other environments only allow the origins
//! listed in `ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use dk_shared::Environment;

use crate::config::CorsConfig;

/// Build the CORS middleware for `environment`
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    if environment.is_development() {
        create_development_cors(config)
    } else {
        create_restricted_cors(config)
    }
}

fn create_development_cors(config: &CorsConfig) -> Cors {
    log::info!("Configuring permissive CORS for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age)
}

fn create_restricted_cors(config: &CorsConfig) -> Cors {
    log::info!(
        "Configuring CORS for {} allowed origins",
        config.allowed_origins.len()
    );

    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(config.max_age);

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
