//! 存储位置服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{
    CreateStorageRequest, ListResponse, NameFilter, StorageDto, TipDto, UpdateStorageRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{NewStorage, Storage};
use crate::repository::{StorageRepositoryTrait, TipRepositoryTrait};

const ENTITY: &str = "storage";

pub struct StorageService<S: StorageRepositoryTrait, T: TipRepositoryTrait> {
    repo: Arc<S>,
    tips: Arc<T>,
}

impl<S: StorageRepositoryTrait, T: TipRepositoryTrait> StorageService<S, T> {
    pub fn new(repo: Arc<S>, tips: Arc<T>) -> Self {
        Self { repo, tips }
    }

    async fn load(&self, id: i64) -> Result<Storage> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self))]
    pub async fn find_storages(&self, filter: NameFilter) -> Result<ListResponse<StorageDto>> {
        let query = filter.into_query();
        let storages = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            storages.into_iter().map(StorageDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_storage(&self, id: i64) -> Result<StorageDto> {
        Ok(self.load(id).await?.into())
    }

    /// 类型不存在时由外键约束返回 400
    #[instrument(skip(self, req), fields(type_id = req.type_id))]
    pub async fn create_storage(&self, req: CreateStorageRequest) -> Result<StorageDto> {
        let result = async {
            let storage = NewStorage {
                name: required_text(&req.name, "name")?,
                temperature: req.temperature,
                humidity: req.humidity,
                type_id: req.type_id,
            };
            self.repo.create(storage).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let storage = result?;
        info!(storage_id = storage.id, name = %storage.name, "Storage created");
        Ok(storage.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_storage(&self, id: i64, req: UpdateStorageRequest) -> Result<StorageDto> {
        let result = async {
            let mut storage = self.load(id).await?;

            merge_text(&mut storage.name, req.name);
            if let Some(temperature) = req.temperature {
                storage.temperature = temperature;
            }
            if let Some(humidity) = req.humidity {
                storage.humidity = humidity;
            }
            if let Some(type_id) = req.type_id {
                storage.type_id = type_id;
            }

            self.repo.update(&storage).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_storage(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);

        if result.is_ok() {
            info!(storage_id = id, "Storage soft-deleted");
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn restore_storage(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.restore(id).await, ENTITY, id);
        record_outcome(ENTITY, "restore", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn find_storage_tips(&self, id: i64) -> Result<Vec<TipDto>> {
        self.load(id).await?;
        let tips = self.repo.find_tips(id).await?;
        Ok(tips.into_iter().map(TipDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn add_storage_tip(&self, id: i64, tip_id: i64) -> Result<TipDto> {
        let result = async {
            self.load(id).await?;
            let tip = self
                .tips
                .find_by_id(tip_id)
                .await?
                .ok_or_else(|| ApiError::not_found("tip", tip_id))?;
            self.repo.add_tip(id, tip_id).await?;
            Ok::<_, ApiError>(tip)
        }
        .await;
        record_outcome("storage_tip", "create", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn remove_storage_tip(&self, id: i64, tip_id: i64) -> Result<()> {
        let result = async {
            self.load(id).await?;
            require_hit(self.repo.remove_tip(id, tip_id).await, "storage tip", tip_id)
        }
        .await;
        record_outcome("storage_tip", "delete", &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockStorageRepositoryTrait, MockTipRepositoryTrait};
    use crate::service::test_support::ts;
    use mockall::predicate::eq;
    use tokio_test::assert_err;

    fn storage(id: i64) -> Storage {
        Storage {
            id,
            name: "Kitchen fridge".to_string(),
            temperature: 4.0,
            humidity: 45.0,
            type_id: 1,
            type_name: "Fridge".to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    fn service(
        repo: MockStorageRepositoryTrait,
    ) -> StorageService<MockStorageRepositoryTrait, MockTipRepositoryTrait> {
        StorageService::new(Arc::new(repo), Arc::new(MockTipRepositoryTrait::new()))
    }

    #[tokio::test]
    async fn test_update_storage_merges_only_present_fields() {
        let mut repo = MockStorageRepositoryTrait::new();
        repo.expect_find_by_id()
            .with(eq(3))
            .returning(|id| Ok(Some(storage(id))));
        repo.expect_update()
            .withf(|s| {
                s.name == "Kitchen fridge"
                    && s.temperature == -18.0
                    && s.humidity == 45.0
                    && s.type_id == 2
            })
            .returning(|s| {
                let mut updated = s.clone();
                updated.type_name = "Freezer".to_string();
                Ok(updated)
            });

        let dto = service(repo)
            .update_storage(
                3,
                UpdateStorageRequest {
                    temperature: Some(-18.0),
                    type_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(dto.temperature, -18.0);
        assert_eq!(dto.storage_type.id, 2);
        assert_eq!(dto.storage_type.name, "Freezer");
    }

    #[tokio::test]
    async fn test_create_storage_passes_fields() {
        let mut repo = MockStorageRepositoryTrait::new();
        repo.expect_create()
            .withf(|s| s.name == "Cellar" && s.type_id == 4 && s.humidity == 70.0)
            .returning(|s| {
                Ok(Storage {
                    id: 8,
                    name: s.name,
                    temperature: s.temperature,
                    humidity: s.humidity,
                    type_id: s.type_id,
                    type_name: "Cellar".to_string(),
                    created_at: ts(),
                    updated_at: ts(),
                })
            });

        let dto = service(repo)
            .create_storage(CreateStorageRequest {
                name: "Cellar".to_string(),
                temperature: 12.0,
                humidity: 70.0,
                type_id: 4,
            })
            .await
            .unwrap();
        assert_eq!(dto.id, 8);
    }

    #[tokio::test]
    async fn test_find_storage_missing() {
        let mut repo = MockStorageRepositoryTrait::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).find_storage(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "storage", .. }));
    }

    #[tokio::test]
    async fn test_add_unknown_tip_is_not_found() {
        let mut repo = MockStorageRepositoryTrait::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(storage(id))));
        repo.expect_add_tip().never();

        let mut tips = MockTipRepositoryTrait::new();
        tips.expect_find_by_id().returning(|_| Ok(None));

        let svc = StorageService::new(Arc::new(repo), Arc::new(tips));
        let err = svc.add_storage_tip(1, 42).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { entity: "tip", .. }));
    }

    #[tokio::test]
    async fn test_restore_active_storage_is_not_found() {
        let mut repo = MockStorageRepositoryTrait::new();
        repo.expect_restore().with(eq(1)).returning(|_| Ok(false));

        assert_err!(service(repo).restore_storage(1).await);
    }
}
