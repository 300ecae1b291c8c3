//! 存储类型 API 处理器
//!
//! 包含类型本身的 CRUD、类型级提示的关联，以及按类型查询存储位置

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{
    AssignTipRequest, CreateStorageTypeRequest, ListResponse, NameFilter, StorageDto,
    StorageTypeDto, TipDto, UpdateStorageTypeRequest,
};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/storage-types
pub async fn list_storage_types(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<StorageTypeDto>> {
    ok(state.storage_types.find_storage_types(filter).await?)
}

/// GET /api/v1/storage-types/{id}
pub async fn get_storage_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StorageTypeDto> {
    ok(state.storage_types.find_storage_type(id).await?)
}

/// POST /api/v1/storage-types
pub async fn create_storage_type(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateStorageTypeRequest>,
) -> ApiResult<StorageTypeDto> {
    ok(state.storage_types.create_storage_type(req).await?)
}

/// PUT /api/v1/storage-types/{id}
pub async fn update_storage_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStorageTypeRequest>,
) -> ApiResult<StorageTypeDto> {
    ok(state.storage_types.update_storage_type(id, req).await?)
}

/// 硬删除
///
/// DELETE /api/v1/storage-types/{id}
pub async fn delete_storage_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.storage_types.delete_storage_type(id).await?;
    done()
}

/// GET /api/v1/storage-types/{id}/tips
pub async fn list_storage_type_tips(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Vec<TipDto>> {
    ok(state.storage_types.find_storage_type_tips(id).await?)
}

/// POST /api/v1/storage-types/{id}/tips
pub async fn add_storage_type_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<AssignTipRequest>,
) -> ApiResult<TipDto> {
    ok(state.storage_types.add_storage_type_tip(id, req.tip_id).await?)
}

/// DELETE /api/v1/storage-types/{id}/tips/{tip_id}
pub async fn remove_storage_type_tip(
    State(state): State<AppState>,
    AppPath((id, tip_id)): AppPath<(i64, i64)>,
) -> ApiResult<()> {
    state.storage_types.remove_storage_type_tip(id, tip_id).await?;
    done()
}

/// GET /api/v1/storage-types/{id}/storages
pub async fn list_storage_type_storages(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Vec<StorageDto>> {
    ok(state.storage_types.find_storage_type_storages(id).await?)
}
