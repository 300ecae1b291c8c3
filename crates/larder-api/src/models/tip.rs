use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 存储提示（如"开封后冷藏"）
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Tip {
    pub id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
