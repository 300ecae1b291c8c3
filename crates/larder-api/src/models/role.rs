use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 角色
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
