use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 存储类型（冰箱、冷冻柜、储藏室……）
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StorageType {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// 存储位置
///
/// 查询时与 `storages_types` 连接，带出类型名称
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Storage {
    pub id: i64,
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    pub type_id: i64,
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStorage {
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    pub type_id: i64,
}
