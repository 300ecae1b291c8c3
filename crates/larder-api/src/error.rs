//! API 错误类型定义
//!
//! 仓储、服务、处理器共用同一个错误类型，在 HTTP 边界统一转换为 JSON 响应。

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("禁止访问: {0}")]
    Forbidden(String),
    #[error("用户名或密码错误")]
    InvalidCredentials,

    // 请求错误
    #[error("参数验证失败: {0}")]
    Validation(String),
    #[error("请求格式错误: {0}")]
    BadRequest(String),
    #[error("引用的记录不存在: {0}")]
    InvalidReference(String),

    // 资源错误
    #[error("{entity} 不存在: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("记录已存在: {0}")]
    AlreadyExists(String),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 构造资源不存在错误
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::BadRequest(_) | Self::InvalidReference(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            // 数据库是上游依赖，失败时返回 502
            Self::Database(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为服务端错误（需要记录日志、隐藏细节）
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "数据服务暂不可用，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => {
                tracing::debug!(error = %other, status = status.as_u16(), "request rejected");
                other.to_string()
            }
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 按 Postgres 约束类型分类 sqlx 错误
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return Self::AlreadyExists(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::InvalidReference(constraint);
            }
        }
        Self::Database(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Unauthorized("Token 已过期".to_string()),
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Unauthorized("无效的 Token".to_string()),
            _ => Self::Internal(format!("JWT 处理失败: {}", err)),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("密码处理失败: {}", err))
    }
}

/// API Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn all_error_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            (
                ApiError::Unauthorized("token expired".into()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (ApiError::Forbidden("admin only".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            (
                ApiError::Validation("name is required".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (ApiError::BadRequest("bad json".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                ApiError::InvalidReference("storages_id_type_fkey".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_REFERENCE",
            ),
            (ApiError::not_found("recipe", 7), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                ApiError::AlreadyExists("roles_name_key".into()),
                StatusCode::CONFLICT,
                "ALREADY_EXISTS",
            ),
            (
                ApiError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::BAD_GATEWAY,
                "DATABASE_ERROR",
            ),
            (
                ApiError::Internal("unexpected".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ]
    }

    #[test]
    fn test_status_and_code_mapping() {
        for (err, status, code) in all_error_variants() {
            assert_eq!(err.status_code(), status, "status for {:?}", err);
            assert_eq!(err.error_code(), code, "code for {:?}", err);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = ApiError::not_found("storage", 42);
        assert_eq!(err.to_string(), "storage 不存在: 42");
    }

    #[test]
    fn test_sqlx_error_without_constraint_is_database_error() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::Database(_)));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_jwt_expired_maps_to_unauthorized() {
        let err: ApiError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature)
                .into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("过期"));
    }

    #[tokio::test]
    async fn test_server_error_body_hides_details() {
        let response = ApiError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "DATABASE_ERROR");
        assert!(!json["message"].as_str().unwrap().contains("pool"));
    }

    #[tokio::test]
    async fn test_client_error_body_keeps_message() {
        let response = ApiError::Validation("limit must be positive".into()).into_response();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("limit must be positive"));
    }
}
