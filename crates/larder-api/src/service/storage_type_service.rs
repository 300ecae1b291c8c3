//! 存储类型服务

use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{
    CreateStorageTypeRequest, ListResponse, NameFilter, StorageDto, StorageTypeDto, TipDto,
    UpdateStorageTypeRequest,
};
use crate::error::{ApiError, Result};
use crate::models::StorageType;
use crate::repository::{StorageTypeRepositoryTrait, TipRepositoryTrait};

const ENTITY: &str = "storage type";

pub struct StorageTypeService<S: StorageTypeRepositoryTrait, T: TipRepositoryTrait> {
    repo: Arc<S>,
    tips: Arc<T>,
}

impl<S: StorageTypeRepositoryTrait, T: TipRepositoryTrait> StorageTypeService<S, T> {
    pub fn new(repo: Arc<S>, tips: Arc<T>) -> Self {
        Self { repo, tips }
    }

    async fn load(&self, id: i64) -> Result<StorageType> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(ENTITY, id))
    }

    #[instrument(skip(self))]
    pub async fn find_storage_types(
        &self,
        filter: NameFilter,
    ) -> Result<ListResponse<StorageTypeDto>> {
        let query = filter.into_query();
        let storage_types = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        Ok(ListResponse::new(
            storage_types.into_iter().map(StorageTypeDto::from).collect(),
            count,
            query.limit,
            query.offset,
        ))
    }

    #[instrument(skip(self))]
    pub async fn find_storage_type(&self, id: i64) -> Result<StorageTypeDto> {
        Ok(self.load(id).await?.into())
    }

    #[instrument(skip(self, req))]
    pub async fn create_storage_type(
        &self,
        req: CreateStorageTypeRequest,
    ) -> Result<StorageTypeDto> {
        let result = async {
            let name = required_text(&req.name, "name")?;
            self.repo.create(&name).await
        }
        .await;
        record_outcome("storage_type", "create", &result);

        let storage_type = result?;
        info!(storage_type_id = storage_type.id, name = %storage_type.name, "Storage type created");
        Ok(storage_type.into())
    }

    #[instrument(skip(self, req))]
    pub async fn update_storage_type(
        &self,
        id: i64,
        req: UpdateStorageTypeRequest,
    ) -> Result<StorageTypeDto> {
        let result = async {
            let mut storage_type = self.load(id).await?;
            merge_text(&mut storage_type.name, req.name);
            self.repo.update(&storage_type).await
        }
        .await;
        record_outcome("storage_type", "update", &result);

        Ok(result?.into())
    }

    /// 硬删除；仍有存储位置引用该类型时返回 400
    #[instrument(skip(self))]
    pub async fn delete_storage_type(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome("storage_type", "delete", &result);

        if result.is_ok() {
            info!(storage_type_id = id, "Storage type deleted");
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn find_storage_type_tips(&self, id: i64) -> Result<Vec<TipDto>> {
        self.load(id).await?;
        let tips = self.repo.find_tips(id).await?;
        Ok(tips.into_iter().map(TipDto::from).collect())
    }

    /// 关联提示并返回该提示；重复关联是幂等的
    #[instrument(skip(self))]
    pub async fn add_storage_type_tip(&self, id: i64, tip_id: i64) -> Result<TipDto> {
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
        record_outcome("storage_type_tip", "create", &result);

        Ok(result?.into())
    }

    #[instrument(skip(self))]
    pub async fn remove_storage_type_tip(&self, id: i64, tip_id: i64) -> Result<()> {
        let result = async {
            self.load(id).await?;
            require_hit(self.repo.remove_tip(id, tip_id).await, "storage type tip", tip_id)
        }
        .await;
        record_outcome("storage_type_tip", "delete", &result);
        result
    }

    #[instrument(skip(self))]
    pub async fn find_storage_type_storages(&self, id: i64) -> Result<Vec<StorageDto>> {
        self.load(id).await?;
        let storages = self.repo.find_storages(id).await?;
        Ok(storages.into_iter().map(StorageDto::from).collect())
    }
}
