//! 可观测性模块集成测试
//!
//! 通过真实的 axum Router 验证中间件行为，以及指标记录与配置加载。

mod metrics_tests {
    use larder_shared::observability::metrics::{
        record_auth_event, record_entity_operation, record_http_request,
    };

    #[test]
    fn test_record_http_request() {
        record_http_request("GET", "/api/v1/recipes", 200, 0.05);
        record_http_request("POST", "/api/v1/recipes", 201, 0.12);
        record_http_request("PUT", "/api/v1/recipes/{id}", 200, 0.08);
        record_http_request("DELETE", "/api/v1/recipes/{id}", 200, 0.03);
        record_http_request("GET", "/api/v1/not-found", 404, 0.01);
        record_http_request("POST", "/api/v1/auth/login", 502, 0.25);
    }

    #[test]
    fn test_record_domain_events() {
        record_entity_operation("storage", "restore", "ok");
        record_entity_operation("tip", "delete", "error");
        record_auth_event("sign_up", "ok");
        record_auth_event("refresh", "invalid_token");
    }

    #[test]
    fn test_metrics_with_edge_cases() {
        record_http_request("GET", "", 200, 0.0);
        record_http_request("GET", "/a/very/long/path/that/goes/on", 599, f64::MAX);
        record_entity_operation("", "", "");
    }
}

mod middleware_tests {
    use axum::{
        Router,
        body::Body,
        extract::Extension,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use http_body_util::BodyExt;
    use larder_shared::observability::middleware::{
        REQUEST_ID_HEADER, RequestId, http_tracing, request_id,
    };
    use tower::ServiceExt;

    async fn echo_request_id(Extension(id): Extension<RequestId>) -> String {
        id.as_str().to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/echo", get(echo_request_id))
            .layer(middleware::from_fn(http_tracing))
            .layer(middleware::from_fn(request_id))
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = app()
            .oneshot(Request::get("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .expect("x-request-id header")
            .to_str()
            .unwrap()
            .to_string();
        assert!(uuid::Uuid::parse_str(&header).is_ok());

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, header.as_bytes());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app()
            .oneshot(
                Request::get("/echo")
                    .header(REQUEST_ID_HEADER, "trace-me-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).unwrap(),
            "trace-me-123"
        );
    }

    #[tokio::test]
    async fn test_tracing_passes_through_status() {
        let response = app()
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}

mod config_tests {
    use larder_shared::observability::{ObservabilityConfig, ObservabilityGuard};

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.service_name, "unknown-service");
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.metrics_port, 9090);
    }

    #[test]
    fn test_config_from_env() {
        let config = ObservabilityConfig::from_env("larder-api");
        assert_eq!(config.service_name, "larder-api");
    }

    #[test]
    fn test_empty_guard() {
        let guard = ObservabilityGuard::empty();
        drop(guard);
    }
}
