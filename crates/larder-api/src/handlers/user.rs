//! 用户管理 API 处理器
//!
//! 写操作与角色分配仅限管理员（在路由层挂载角色检查）

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{
    AssignRoleRequest, CreateUserRequest, ListResponse, NameFilter, RoleDto, UpdateUserRequest,
    UserDto,
};
use crate::extract::{AppJson, AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<UserDto>> {
    ok(state.users.find_users(filter).await?)
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<UserDto> {
    ok(state.users.find_user(id).await?)
}

/// 创建用户，可同时分配角色
///
/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<UserDto> {
    ok(state.users.create_user(req).await?)
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    ok(state.users.update_user(id, req).await?)
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.users.delete_user(id).await?;
    done()
}

/// POST /api/v1/users/{id}/restore
pub async fn restore_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.users.restore_user(id).await?;
    done()
}

/// GET /api/v1/users/{id}/roles
pub async fn list_user_roles(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Vec<RoleDto>> {
    ok(state.users.find_user_roles(id).await?)
}

/// 分配角色，返回分配后的角色列表
///
/// POST /api/v1/users/{id}/roles
pub async fn add_user_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<AssignRoleRequest>,
) -> ApiResult<Vec<RoleDto>> {
    ok(state.users.add_user_role(id, req.role_id).await?)
}

/// DELETE /api/v1/users/{id}/roles/{role_id}
pub async fn remove_user_role(
    State(state): State<AppState>,
    AppPath((id, role_id)): AppPath<(i64, i64)>,
) -> ApiResult<()> {
    state.users.remove_user_role(id, role_id).await?;
    done()
}
