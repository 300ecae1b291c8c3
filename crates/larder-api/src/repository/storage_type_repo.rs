//! 存储类型仓储
//!
//! 存储类型不做软删除，删除时关联的提示一并级联删除

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::traits::StorageTypeRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, Storage, StorageType, Tip};

pub struct StorageTypeRepository {
    pool: PgPool,
}

impl StorageTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StorageTypeRepositoryTrait for StorageTypeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<StorageType>> {
        let storage_type = sqlx::query_as::<_, StorageType>(
            "SELECT id, name, created_at FROM storages_types WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(storage_type)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<StorageType>> {
        let storage_types = sqlx::query_as::<_, StorageType>(
            r#"
            SELECT id, name, created_at
            FROM storages_types
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

        Ok(storage_types)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM storages_types WHERE name ILIKE $1")
                .bind(query.pattern())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<StorageType> {
        let storage_type = sqlx::query_as::<_, StorageType>(
            "INSERT INTO storages_types (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(storage_type)
    }

    #[instrument(skip(self, storage_type), fields(storage_type_id = storage_type.id))]
    async fn update(&self, storage_type: &StorageType) -> Result<StorageType> {
        let updated = sqlx::query_as::<_, StorageType>(
            "UPDATE storages_types SET name = $2 WHERE id = $1 RETURNING id, name, created_at",
        )
        .bind(storage_type.id)
        .bind(&storage_type.name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("storage type", storage_type.id))?;

        Ok(updated)
    }

    /// 仍被存储位置引用时触发外键约束错误
    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM storages_types WHERE id = $1")
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
            JOIN storages_types_tips stt ON stt.id_tip = t.id
            WHERE stt.id_storage_type = $1 AND t.deleted_at IS NULL
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
            r#"
            INSERT INTO storages_types_tips (id_storage_type, id_tip)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id)
        .bind(tip_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn remove_tip(&self, id: i64, tip_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM storages_types_tips WHERE id_storage_type = $1 AND id_tip = $2",
        )
        .bind(id)
        .bind(tip_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_storages(&self, id: i64) -> Result<Vec<Storage>> {
        let storages = sqlx::query_as::<_, Storage>(
            r#"
            SELECT s.id, s.name, s.temperature, s.humidity,
                   s.id_type AS type_id, t.name AS type_name,
                   s.created_at, s.updated_at
            FROM storages s
            JOIN storages_types t ON t.id = s.id_type
            WHERE s.id_type = $1 AND s.deleted_at IS NULL
            ORDER BY s.id ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(storages)
    }
}
