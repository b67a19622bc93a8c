//! HTTPS enforcement and security response headers
//!
//! Outside development, plain-HTTP requests are refused unless a trusted
//! proxy vouches for them with `X-Forwarded-Proto: https`, and every response
//! carries HSTS and related headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{self, HeaderName, HeaderValue},
        StatusCode,
    },
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use dk_shared::{error_codes, Environment};

use crate::config::SecurityConfig;
use crate::handlers::ApiError;

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Arc<Vec<String>>,
}

impl SecurityMiddleware {
    /// Settings for `environment`: only development runs without HTTPS
    pub fn new(environment: Environment, config: &SecurityConfig) -> Self {
        let strict = !environment.is_development();

        log::info!(
            "Security middleware configured: enforce_https={}, trusted_proxies={:?}",
            strict,
            config.trusted_proxies
        );

        Self {
            enforce_https: strict,
            add_security_headers: strict,
            trusted_proxies: Arc::new(config.trusted_proxies.clone()),
        }
    }

    /// No HTTPS enforcement and no extra headers
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: false,
            trusted_proxies: Arc::new(Vec::new()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Arc::clone(&self.trusted_proxies),
        }))
    }
}

pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Arc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                return Ok(reject(
                    req,
                    ApiError::new(
                        StatusCode::FORBIDDEN,
                        error_codes::HTTPS_REQUIRED,
                        "HTTPS required",
                    ),
                    add_security_headers,
                ));
            }

            let bad_origin = req
                .headers()
                .get(header::ORIGIN)
                .filter(|origin| !is_well_formed_origin(origin))
                .cloned();
            if let Some(origin) = bad_origin {
                log::warn!(
                    "Malformed origin blocked: {:?} for {} {}",
                    origin,
                    req.method(),
                    req.path()
                );
                return Ok(reject(
                    req,
                    ApiError::new(
                        StatusCode::BAD_REQUEST,
                        error_codes::INVALID_ORIGIN,
                        "Invalid request origin",
                    ),
                    add_security_headers,
                ));
            }

            let mut response = service.call(req).await?.map_into_left_body();

            if add_security_headers {
                add_security_response_headers(&mut response);
            }

            Ok(response)
        })
    }
}

/// Answer the request here with a JSON error instead of calling the app
fn reject<B>(
    req: ServiceRequest,
    error: ApiError,
    add_security_headers: bool,
) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    let mut response =
        ServiceResponse::new(request, error.error_response()).map_into_right_body();
    if add_security_headers {
        add_security_response_headers(&mut response);
    }
    response
}

fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    // connection_info() already honours X-Forwarded-Proto from anyone, so
    // look at the listener itself
    if req.app_config().secure() {
        return true;
    }

    let forwarded_https = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|proto| proto.eq_ignore_ascii_case("https"))
        .unwrap_or(false);

    forwarded_https
        && req
            .peer_addr()
            .map(|addr| is_trusted_proxy(&addr.ip().to_string(), trusted_proxies))
            .unwrap_or(false)
}

fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    trusted_proxies.iter().any(|trusted| trusted == ip)
}

/// Origins must be http(s) URLs; CORS decides whether they are allowed
fn is_well_formed_origin(origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|o| o.starts_with("http://") || o.starts_with("https://"))
        .unwrap_or(false)
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    const HEADERS: [(&str, &str); 5] = [
        ("strict-transport-security", "max-age=31536000; includeSubDomains"),
        ("x-content-type-options", "nosniff"),
        ("x-frame-options", "DENY"),
        ("referrer-policy", "strict-origin-when-cross-origin"),
        ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
    ];

    let headers = response.headers_mut();
    for (name, value) in HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use std::net::SocketAddr;

    fn strict(trusted: &[&str]) -> SecurityMiddleware {
        SecurityMiddleware::new(
            Environment::Production,
            &SecurityConfig {
                trusted_proxies: trusted.iter().map(|s| s.to_string()).collect(),
            },
        )
    }

    #[actix_rt::test]
    async fn test_plain_http_is_refused_in_production() {
        let app = test::init_service(
            App::new()
                .wrap(strict(&[]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "https_required");
    }

    #[actix_rt::test]
    async fn test_trusted_proxy_forwarded_https_passes_with_headers() {
        let app = test::init_service(
            App::new()
                .wrap(strict(&["10.0.0.1"]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let peer: SocketAddr = "10.0.0.1:40000".parse().unwrap();
        let req = test::TestRequest::get()
            .uri("/")
            .peer_addr(peer)
            .insert_header(("x-forwarded-proto", "https"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("x-frame-options").unwrap(), "DENY");
        assert!(resp.headers().contains_key("strict-transport-security"));
    }

    #[actix_rt::test]
    async fn test_untrusted_forwarded_header_is_ignored() {
        let app = test::init_service(
            App::new()
                .wrap(strict(&["10.0.0.1"]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let peer: SocketAddr = "192.168.1.20:40000".parse().unwrap();
        let req = test::TestRequest::get()
            .uri("/")
            .peer_addr(peer)
            .insert_header(("x-forwarded-proto", "https"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn test_malformed_origin_is_rejected_as_json() {
        let app = test::init_service(
            App::new()
                .wrap(strict(&["10.0.0.1"]))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let peer: SocketAddr = "10.0.0.1:40000".parse().unwrap();
        let req = test::TestRequest::get()
            .uri("/")
            .peer_addr(peer)
            .insert_header(("x-forwarded-proto", "https"))
            .insert_header((header::ORIGIN, "null"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().contains_key("strict-transport-security"));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_origin");
        assert_eq!(body["error"], "Invalid request origin");
    }

    #[actix_rt::test]
    async fn test_development_passes_through() {
        let app = test::init_service(
            App::new()
                .wrap(SecurityMiddleware::development())
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key("x-frame-options"));
    }

    #[actix_rt::test]
    async fn test_origin_shape() {
        assert!(is_well_formed_origin(&HeaderValue::from_static("https://app.devkit.dev")));
        assert!(!is_well_formed_origin(&HeaderValue::from_static("null")));
    }
}
