//! 角色仓储

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::RoleRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, Role};

pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepositoryTrait for RoleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Role>> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM roles
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM roles
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

        Ok(roles)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM roles WHERE deleted_at IS NULL AND name ILIKE $1",
        )
        .bind(query.pattern())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    #[instrument(skip(self, role), fields(role_id = role.id))]
    async fn update(&self, role: &Role) -> Result<Role> {
        let role = sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles
            SET name = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(role.id)
        .bind(&role.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("role", role.id))?;

        Ok(role)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE roles SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE roles SET deleted_at = NULL, updated_at = NOW() WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
