//! 用户仓储
//!
//! 用户与角色的关联存放在 `users_roles`

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use super::traits::UserRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, NewUser, Role, User};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 在事务中为用户分配角色
    ///
    /// 只关联活跃角色；任一角色不存在时返回错误，由调用方回滚
    pub async fn assign_roles_in_tx(
        tx: &mut PgConnection,
        user_id: i64,
        role_ids: &[i64],
    ) -> Result<()> {
        if role_ids.is_empty() {
            return Ok(());
        }

        let mut unique_ids = role_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let result = sqlx::query(
            r#"
            INSERT INTO users_roles (id_user, id_role)
            SELECT $1, id FROM roles
            WHERE id = ANY($2) AND deleted_at IS NULL
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(&unique_ids)
        .execute(tx)
        .await?;

        if result.rows_affected() < unique_ids.len() as u64 {
            return Err(ApiError::InvalidReference("users_roles_id_role_fkey".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, password_hash, created_at, updated_at
            FROM users
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, password_hash, created_at, updated_at
            FROM users
            WHERE deleted_at IS NULL AND name ILIKE $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND name ILIKE $1",
        )
        .bind(query.pattern())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self, user), fields(name = %user.name, roles = user.role_ids.len()))]
    async fn create(&self, user: NewUser) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, password_hash)
            VALUES ($1, $2)
            RETURNING id, name, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&mut *tx)
        .await?;

        Self::assign_roles_in_tx(&mut *tx, created.id, &user.role_ids).await?;

        tx.commit().await?;
        Ok(created)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: &User) -> Result<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("user", user.id))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NULL, updated_at = NOW() WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_roles(&self, user_id: i64) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name, r.created_at, r.updated_at
            FROM roles r
            JOIN users_roles ur ON ur.id_role = r.id
            WHERE ur.id_user = $1 AND r.deleted_at IS NULL
            ORDER BY r.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    #[instrument(skip(self))]
    async fn add_role(&self, user_id: i64, role_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO users_roles (id_user, id_role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_role(&self, user_id: i64, role_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users_roles WHERE id_user = $1 AND id_role = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
