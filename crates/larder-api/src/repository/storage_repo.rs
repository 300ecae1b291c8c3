//! 存储位置仓储
//!
//! 查询结果总是连接 `storages_types` 带出类型名称

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::StorageRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, NewStorage, Storage, Tip};

pub struct StorageRepository {
    pool: PgPool,
}

impl StorageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageRepositoryTrait for StorageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Storage>> {
        let storage = sqlx::query_as::<_, Storage>(
            r#"
            SELECT s.id, s.name, s.temperature, s.humidity,
                   s.id_type AS type_id, t.name AS type_name,
                   s.created_at, s.updated_at
            FROM storages s
            JOIN storages_types t ON t.id = s.id_type
            WHERE s.id = $1 AND s.deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(storage)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Storage>> {
        let storages = sqlx::query_as::<_, Storage>(
            r#"
            SELECT s.id, s.name, s.temperature, s.humidity,
                   s.id_type AS type_id, t.name AS type_name,
                   s.created_at, s.updated_at
            FROM storages s
            JOIN storages_types t ON t.id = s.id_type
            WHERE s.deleted_at IS NULL AND s.name ILIKE $1
            ORDER BY s.id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(storages)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM storages WHERE deleted_at IS NULL AND name ILIKE $1",
        )
        .bind(query.pattern())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self, storage), fields(name = %storage.name, type_id = storage.type_id))]
    async fn create(&self, storage: NewStorage) -> Result<Storage> {
        let created = sqlx::query_as::<_, Storage>(
            r#"
            WITH s AS (
                INSERT INTO storages (name, temperature, humidity, id_type)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, temperature, humidity, id_type, created_at, updated_at
            )
            SELECT s.id, s.name, s.temperature, s.humidity,
                   s.id_type AS type_id, t.name AS type_name,
                   s.created_at, s.updated_at
            FROM s
            JOIN storages_types t ON t.id = s.id_type
            "#,
        )
        .bind(&storage.name)
        .bind(storage.temperature)
        .bind(storage.humidity)
        .bind(storage.type_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self, storage), fields(storage_id = storage.id))]
    async fn update(&self, storage: &Storage) -> Result<Storage> {
        let updated = sqlx::query_as::<_, Storage>(
            r#"
            WITH s AS (
                UPDATE storages
                SET name = $2, temperature = $3, humidity = $4, id_type = $5, updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING id, name, temperature, humidity, id_type, created_at, updated_at
            )
            SELECT s.id, s.name, s.temperature, s.humidity,
                   s.id_type AS type_id, t.name AS type_name,
                   s.created_at, s.updated_at
            FROM s
            JOIN storages_types t ON t.id = s.id_type
            "#,
        )
        .bind(storage.id)
        .bind(&storage.name)
        .bind(storage.temperature)
        .bind(storage.humidity)
        .bind(storage.type_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("storage", storage.id))?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE storages SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE storages SET deleted_at = NULL, updated_at = NOW() WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_tips(&self, id: i64) -> Result<Vec<Tip>> {
        let tips = sqlx::query_as::<_, Tip>(
            r#"
            SELECT t.id, t.description, t.created_at, t.updated_at
            FROM tips t
            JOIN storages_tips st ON st.id_tip = t.id
            WHERE st.id_storage = $1 AND t.deleted_at IS NULL
            ORDER BY t.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tips)
    }

    #[instrument(skip(self))]
    async fn add_tip(&self, id: i64, tip_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO storages_tips (id_storage, id_tip) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(tip_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_tip(&self, id: i64, tip_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM storages_tips WHERE id_storage = $1 AND id_tip = $2")
            .bind(id)
            .bind(tip_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
