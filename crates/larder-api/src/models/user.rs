use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 用户
///
/// 角色通过 `users_roles` 关联，单独查询
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待创建的用户，密码已完成哈希
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
    pub role_ids: Vec<i64>,
}
