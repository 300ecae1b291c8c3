//! 步骤仓储
//!
//! 步骤被菜谱引用时不可删除（外键约束）

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::StepRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, Step};

pub struct StepRepository {
    pool: PgPool,
}

impl StepRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StepRepositoryTrait for StepRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Step>> {
        let step = sqlx::query_as::<_, Step>("SELECT id, name, created_at FROM steps WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(step)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Step>> {
        let steps = sqlx::query_as::<_, Step>(
            r#"
            SELECT id, name, created_at
            FROM steps
            WHERE name ILIKE $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(steps)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM steps WHERE name ILIKE $1")
            .bind(query.pattern())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Step> {
        let step = sqlx::query_as::<_, Step>(
            "INSERT INTO steps (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(step)
    }

    #[instrument(skip(self, step), fields(step_id = step.id))]
    async fn update(&self, step: &Step) -> Result<Step> {
        let updated = sqlx::query_as::<_, Step>(
            "UPDATE steps SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(step.id)
        .bind(&step.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("step", step.id))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM steps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
