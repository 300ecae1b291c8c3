//! 角色管理 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{CreateRoleRequest, ListResponse, NameFilter, RoleDto, UpdateRoleRequest};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// 获取角色列表
///
/// GET /api/v1/roles
pub async fn list_roles(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<RoleDto>> {
    ok(state.roles.find_roles(filter).await?)
}

/// GET /api/v1/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<RoleDto> {
    ok(state.roles.find_role(id).await?)
}

/// 创建角色（管理员）
///
/// POST /api/v1/roles
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<RoleDto> {
    ok(state.roles.create_role(req).await?)
}

/// PUT /api/v1/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<RoleDto> {
    ok(state.roles.update_role(id, req).await?)
}

/// 软删除角色
///
/// DELETE /api/v1/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.roles.delete_role(id).await?;
    done()
}

/// POST /api/v1/roles/{id}/restore
pub async fn restore_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.roles.restore_role(id).await?;
    done()
}
