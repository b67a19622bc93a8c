//! Handler tests for /api/v1/users, /health and the fallback route

mod common;

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    use dk_api::app::create_app;
    use dk_api::config::HttpConfig;
    use dk_core::services::StaticTextGenerator;

    use crate::common::TestContext;

    macro_rules! init_app {
        ($ctx:expr) => {
            test::init_service(create_app($ctx.state.clone(), &HttpConfig::development())).await
        };
    }

    macro_rules! get {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri($uri).to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    async fn register(ctx: &TestContext, email: &str, username: &str) {
        ctx.state
            .account_service
            .register(email, username, "correct horse battery")
            .await
            .unwrap();
    }

    #[actix_rt::test]
    async fn test_suggestions_drop_taken_and_malformed() {
        let ctx = TestContext::with_generator(StaticTextGenerator::new(
            "code_wizard\nbyte_smith\nrust_ranger\nStack_Tracer\nlambda_lark",
        ));
        let app = init_app!(ctx);
        register(&ctx, "taken@example.com", "byte_smith").await;

        let (status, body) = get!(app, "/api/v1/users/username-suggestions");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Username suggestions generated");
        assert_eq!(
            body["usernames"],
            serde_json::json!(["code_wizard", "rust_ranger", "lambda_lark"])
        );
    }

    #[actix_rt::test]
    async fn test_suggestions_may_be_empty() {
        let ctx = TestContext::with_generator(StaticTextGenerator::new("Not Valid!\n\n"));
        let app = init_app!(ctx);

        let (status, body) = get!(app, "/api/v1/users/username-suggestions");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["usernames"], serde_json::json!([]));
    }

    #[actix_rt::test]
    async fn test_suggestion_generator_failure_is_bad_gateway() {
        let ctx = TestContext::with_generator(StaticTextGenerator::failing("quota exceeded"));
        let app = init_app!(ctx);

        let (status, body) = get!(app, "/api/v1/users/username-suggestions");

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "external_service_error");
        assert!(!body["error"].as_str().unwrap().contains("quota"));
    }

    #[actix_rt::test]
    async fn test_username_availability() {
        let ctx = TestContext::new(&["111111"]);
        let app = init_app!(ctx);
        register(&ctx, "dev@example.com", "rust_dev").await;

        let (status, body) = get!(app, "/api/v1/users/username-available?username=rust_dev");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "rust_dev");
        assert_eq!(body["available"], false);

        let (status, body) = get!(app, "/api/v1/users/username-available?username=free_name");
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
    }

    #[actix_rt::test]
    async fn test_username_availability_rejects_bad_input() {
        let ctx = TestContext::new(&["111111"]);
        let app = init_app!(ctx);

        let (status, body) = get!(app, "/api/v1/users/username-available?username=NO");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");

        let (status, body) = get!(app, "/api/v1/users/username-available");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
    }

    #[actix_rt::test]
    async fn test_health_check() {
        let ctx = TestContext::new(&["111111"]);
        let app = init_app!(ctx);

        let (status, body) = get!(app, "/health");

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "devkit-api");
    }

    #[actix_rt::test]
    async fn test_unknown_route_is_json_not_found() {
        let ctx = TestContext::new(&["111111"]);
        let app = init_app!(ctx);

        let (status, body) = get!(app, "/api/v1/nothing-here");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }
}
