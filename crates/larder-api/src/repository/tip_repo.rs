//! 提示仓储

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::TipRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, Tip};

pub struct TipRepository {
    pool: PgPool,
}

impl TipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TipRepositoryTrait for TipRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Tip>> {
        let tip = sqlx::query_as::<_, Tip>(
            r#"
            SELECT id, description, created_at, updated_at
            FROM tips
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tip)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Tip>> {
        let tips = sqlx::query_as::<_, Tip>(
            r#"
            SELECT id, description, created_at, updated_at
            FROM tips
            WHERE deleted_at IS NULL AND description ILIKE $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(tips)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM tips WHERE deleted_at IS NULL AND description ILIKE $1",
        )
        .bind(query.pattern())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self, description))]
    async fn create(&self, description: &str) -> Result<Tip> {
        let tip = sqlx::query_as::<_, Tip>(
            r#"
            INSERT INTO tips (description)
            VALUES ($1)
            RETURNING id, description, created_at, updated_at
            "#,
        )
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(tip)
    }

    #[instrument(skip(self, tip), fields(tip_id = tip.id))]
    async fn update(&self, tip: &Tip) -> Result<Tip> {
        let updated = sqlx::query_as::<_, Tip>(
            r#"
            UPDATE tips
            SET description = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, description, created_at, updated_at
            "#,
        )
        .bind(tip.id)
        .bind(&tip.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("tip", tip.id))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result =
            sqlx::query("UPDATE tips SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE tips SET deleted_at = NULL, updated_at = NOW() WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
