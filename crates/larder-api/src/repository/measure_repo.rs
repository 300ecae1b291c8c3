//! 计量单位仓储

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::MeasureRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, Measure};

pub struct MeasureRepository {
    pool: PgPool,
}

impl MeasureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeasureRepositoryTrait for MeasureRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Measure>> {
        let measure = sqlx::query_as::<_, Measure>(
            "SELECT id, name, created_at FROM measures WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(measure)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Measure>> {
        let measures = sqlx::query_as::<_, Measure>(
            r#"
            SELECT id, name, created_at
            FROM measures
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

        Ok(measures)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measures WHERE name ILIKE $1")
            .bind(query.pattern())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Measure> {
        let measure = sqlx::query_as::<_, Measure>(
            "INSERT INTO measures (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(measure)
    }

    #[instrument(skip(self, measure), fields(measure_id = measure.id))]
    async fn update(&self, measure: &Measure) -> Result<Measure> {
        let updated = sqlx::query_as::<_, Measure>(
            "UPDATE measures SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(measure.id)
        .bind(&measure.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("measure", measure.id))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM measures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
