//! 角色检查中间件
//!
//! 检查已认证用户是否拥有指定角色

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;

use crate::auth::Claims;
use crate::error::ApiError;

/// 角色检查中间件工厂
///
/// # 示例
/// ```ignore
/// .route("/roles", post(create_role).layer(axum::middleware::from_fn(require_role("admin"))))
/// ```
pub fn require_role(
    role: &'static str,
) -> impl Fn(Request<Body>, Next) -> Pin<Box<dyn Future<Output = Response> + Send>>
+ Clone
+ Send
+ Sync {
    move |request: Request<Body>, next: Next| Box::pin(check_role(request, next, role))
}

async fn check_role(request: Request<Body>, next: Next, required_role: &'static str) -> Response {
    // Claims 由 auth_middleware 注入
    let Some(claims) = request.extensions().get::<Claims>() else {
        return ApiError::Unauthorized("未认证".to_string()).into_response();
    };

    if !claims.has_role(required_role) {
        return ApiError::Forbidden(format!("需要 {} 角色", required_role)).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKind;
    use axum::{Router, http::StatusCode, routing::post};
    use tower::ServiceExt;

    fn claims(roles: &[&str]) -> Claims {
        Claims {
            sub: "1".to_string(),
            name: "alice".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            kind: TokenKind::Access,
            iat: 0,
            exp: i64::MAX,
            iss: "larder-api".to_string(),
        }
    }

    fn app() -> Router {
        Router::new().route(
            "/roles",
            post(|| async { "created" }).layer(axum::middleware::from_fn(require_role("admin"))),
        )
    }

    async fn call(claims: Option<Claims>) -> StatusCode {
        let mut request = Request::builder()
            .method("POST")
            .uri("/roles")
            .body(Body::empty())
            .unwrap();
        if let Some(claims) = claims {
            request.extensions_mut().insert(claims);
        }
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_admin_passes() {
        assert_eq!(call(Some(claims(&["user", "admin"]))).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_role_is_forbidden() {
        assert_eq!(call(Some(claims(&["user"]))).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unauthenticated_is_unauthorized() {
        assert_eq!(call(None).await, StatusCode::UNAUTHORIZED);
    }
}
