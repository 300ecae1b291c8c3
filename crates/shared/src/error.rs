//! 基础设施错误类型
//!
//! 覆盖配置、数据库连接与迁移等共享组件的失败场景，业务错误由各服务自行定义。

use thiserror::Error;

/// 共享组件错误类型
#[derive(Debug, Error)]
pub enum LarderError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, LarderError>;

impl LarderError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误（连接池耗尽、网络抖动等）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database(sqlx::Error::PoolTimedOut)
                | Self::Database(sqlx::Error::Io(_))
                | Self::Database(sqlx::Error::PoolClosed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = LarderError::Internal("boom".to_string());
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(LarderError::Database(sqlx::Error::RowNotFound).code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_is_retryable() {
        assert!(LarderError::Database(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!LarderError::Database(sqlx::Error::RowNotFound).is_retryable());
        assert!(!LarderError::Internal("x".to_string()).is_retryable());
    }
}
