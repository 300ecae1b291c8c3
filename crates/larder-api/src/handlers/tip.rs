//! 存储提示 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{CreateTipRequest, ListResponse, TipDto, TipFilter, UpdateTipRequest};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// 获取提示列表，按描述模糊过滤
///
/// GET /api/v1/tips
pub async fn list_tips(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<TipFilter>,
) -> ApiResult<ListResponse<TipDto>> {
    ok(state.tips.find_tips(filter).await?)
}

pub async fn get_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<TipDto> {
    ok(state.tips.find_tip(id).await?)
}

pub async fn create_tip(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTipRequest>,
) -> ApiResult<TipDto> {
    ok(state.tips.create_tip(req).await?)
}

pub async fn update_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTipRequest>,
) -> ApiResult<TipDto> {
    ok(state.tips.update_tip(id, req).await?)
}

pub async fn delete_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.tips.delete_tip(id).await?;
    done()
}

pub async fn restore_tip(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.tips.restore_tip(id).await?;
    done()
}
