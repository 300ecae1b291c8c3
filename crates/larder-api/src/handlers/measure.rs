//! 计量单位 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{
    CreateMeasureRequest, ListResponse, MeasureDto, NameFilter, UpdateMeasureRequest,
};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/measures
pub async fn list_measures(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<MeasureDto>> {
    ok(state.measures.find_measures(filter).await?)
}

/// GET /api/v1/measures/{id}
pub async fn get_measure(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<MeasureDto> {
    ok(state.measures.find_measure(id).await?)
}

/// POST /api/v1/measures
pub async fn create_measure(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateMeasureRequest>,
) -> ApiResult<MeasureDto> {
    ok(state.measures.create_measure(req).await?)
}

/// PUT /api/v1/measures/{id}
pub async fn update_measure(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateMeasureRequest>,
) -> ApiResult<MeasureDto> {
    ok(state.measures.update_measure(id, req).await?)
}

/// 硬删除
///
/// DELETE /api/v1/measures/{id}
pub async fn delete_measure(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.measures.delete_measure(id).await?;
    done()
}
