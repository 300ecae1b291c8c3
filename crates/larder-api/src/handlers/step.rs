//! 烹饪步骤 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{CreateStepRequest, ListResponse, NameFilter, StepDto, UpdateStepRequest};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

pub async fn list_steps(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<StepDto>> {
    ok(state.steps.find_steps(filter).await?)
}

pub async fn get_step(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StepDto> {
    ok(state.steps.find_step(id).await?)
}

pub async fn create_step(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateStepRequest>,
) -> ApiResult<StepDto> {
    ok(state.steps.create_step(req).await?)
}

pub async fn update_step(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStepRequest>,
) -> ApiResult<StepDto> {
    ok(state.steps.update_step(id, req).await?)
}

/// 被菜谱引用的步骤无法删除（外键约束返回 400）
pub async fn delete_step(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.steps.delete_step(id).await?;
    done()
}
