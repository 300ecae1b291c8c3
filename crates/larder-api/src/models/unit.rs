//! 只有名称的字典表：计量单位、菜谱步骤

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 计量单位（克、毫升、个……）
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Measure {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// 菜谱步骤
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Step {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
