//! JWT 认证中间件
//!
//! 验证请求中的 access token 并将 Claims 注入请求扩展

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// 存放 access token 的 Cookie 名称
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 公开路由（不需要认证）
const PUBLIC_PATHS: [&str; 5] = [
    "/api/v1/auth/sign-up",
    "/api/v1/auth/login",
    "/api/v1/auth/refresh",
    "/health",
    "/ready",
];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path.trim_end_matches('/'))
}

/// 认证中间件
///
/// Token 优先取 `Authorization: Bearer`，其次取 `access_token` Cookie。
/// 校验通过后将 Claims 注入请求扩展，供后续处理器与角色检查使用。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if is_public_path(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = extract_token(request.headers()) else {
        return ApiError::Unauthorized("缺少认证 Token".to_string()).into_response();
    };

    match state.auth.verify_access_token(&token) {
        Ok(claims) => {
            debug!(user_id = %claims.sub, "Request authenticated");
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
