//! 认证相关的 HTTP 处理器
//!
//! 提供注册、登录、刷新 Token、登出和获取当前用户的 API。
//! Token 同时在响应体中返回并写入 HttpOnly Cookie。

use axum::{
    Extension, Json,
    body::Bytes,
    extract::State,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use larder_shared::observability::metrics::record_auth_event;
use tracing::info;

use super::{ApiResult, ok};
use crate::auth::Claims;
use crate::dto::{
    ApiResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
    SignUpRequest, UserDto,
};
use crate::error::{ApiError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::ACCESS_TOKEN_COOKIE;
use crate::state::AppState;

pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// 供前端判断登录状态，不带 HttpOnly
pub const LOGGED_IN_COOKIE: &str = "logged_in";

const TOKEN_TYPE: &str = "Bearer";

fn auth_cookie(
    name: &'static str,
    value: String,
    http_only: bool,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(http_only)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

/// 过期 Cookie，无论请求是否携带该 Cookie 都会下发
fn removal(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// 自助注册
///
/// POST /api/v1/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignUpRequest>,
) -> ApiResult<UserDto> {
    ok(state.auth.sign_up(req).await?)
}

/// 用户登录
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let outcome = state.auth.login(req).await?;
    let secure = state.cookie_secure;

    let jar = jar
        .add(auth_cookie(ACCESS_TOKEN_COOKIE, outcome.access.token.clone(), true, secure))
        .add(auth_cookie(REFRESH_TOKEN_COOKIE, outcome.refresh.token.clone(), true, secure))
        .add(auth_cookie(LOGGED_IN_COOKIE, "true".to_string(), false, secure));

    let response = LoginResponse {
        access_token: outcome.access.token,
        access_token_expires_at: outcome.access.expires_at,
        refresh_token: outcome.refresh.token,
        refresh_token_expires_at: outcome.refresh.expires_at,
        token_type: TOKEN_TYPE.to_string(),
        user: outcome.user,
    };

    Ok((jar, Json(ApiResponse::success(response))))
}

/// 刷新 access token
///
/// refresh token 优先取请求体的 `refreshToken`，其次取 `refresh_token` Cookie；
/// 请求体可以为空。
///
/// POST /api/v1/auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<ApiResponse<RefreshTokenResponse>>)> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        RefreshTokenRequest::default()
    } else {
        serde_json::from_slice::<RefreshTokenRequest>(&body)
            .map_err(|e| ApiError::BadRequest(format!("请求体解析失败: {}", e)))?
    };

    let token = req
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| ApiError::Unauthorized("缺少 Refresh Token".to_string()))?;

    let issued = state.auth.refresh(&token).await?;

    let jar = jar.add(auth_cookie(
        ACCESS_TOKEN_COOKIE,
        issued.token.clone(),
        true,
        state.cookie_secure,
    ));

    let response = RefreshTokenResponse {
        access_token: issued.token,
        access_token_expires_at: issued.expires_at,
        token_type: TOKEN_TYPE.to_string(),
    };

    Ok((jar, Json(ApiResponse::success(response))))
}

/// 用户登出，清除全部认证 Cookie
///
/// POST /api/v1/auth/logout
pub async fn logout(
    Extension(claims): Extension<Claims>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    info!(user_id = %claims.sub, "User logged out");
    record_auth_event("logout", "success");

    let jar = jar
        .add(removal(ACCESS_TOKEN_COOKIE))
        .add(removal(REFRESH_TOKEN_COOKIE))
        .add(removal(LOGGED_IN_COOKIE));

    (jar, Json(ApiResponse::<()>::success_empty()))
}

/// 获取当前用户信息
///
/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<UserDto> {
    ok(state.auth.current_user(&claims).await?)
}
