//! 存储位置 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{
    AssignTipRequest, CreateStorageRequest, ListResponse, NameFilter, StorageDto, TipDto,
    UpdateStorageRequest,
};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/storages
pub async fn list_storages(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<StorageDto>> {
    ok(state.storages.find_storages(filter).await?)
}

/// GET /api/v1/storages/{id}
pub async fn get_storage(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StorageDto> {
    ok(state.storages.find_storage(id).await?)
}

/// POST /api/v1/storages
pub async fn create_storage(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateStorageRequest>,
) -> ApiResult<StorageDto> {
    ok(state.storages.create_storage(req).await?)
}

/// PUT /api/v1/storages/{id}
pub async fn update_storage(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStorageRequest>,
) -> ApiResult<StorageDto> {
    ok(state.storages.update_storage(id, req).await?)
}

/// DELETE /api/v1/storages/{id}
pub async fn delete_storage(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.storages.delete_storage(id).await?;
    done()
}

/// POST /api/v1/storages/{id}/restore
pub async fn restore_storage(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.storages.restore_storage(id).await?;
    done()
}

pub async fn list_storage_tips(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Vec<TipDto>> {
    ok(state.storages.find_storage_tips(id).await?)
}

pub async fn add_storage_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<AssignTipRequest>,
) -> ApiResult<TipDto> {
    ok(state.storages.add_storage_tip(id, req.tip_id).await?)
}

pub async fn remove_storage_tip(
    State(state): State<AppState>,
    AppPath((id, tip_id)): AppPath<(i64, i64)>,
) -> ApiResult<()> {
    state.storages.remove_storage_tip(id, tip_id).await?;
    done()
}
