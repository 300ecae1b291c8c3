//! 菜谱 API 处理器

use axum::extract::State;

use super::{ApiResult, done, ok};
use crate::dto::{
    CreateRecipeRequest, ListResponse, NameFilter, RecipeDto, UpdateRecipeRequest,
};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<NameFilter>,
) -> ApiResult<ListResponse<RecipeDto>> {
    ok(state.recipes.find_recipes(filter).await?)
}

/// GET /api/v1/recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<RecipeDto> {
    ok(state.recipes.find_recipe(id).await?)
}

/// 按名称精确查找
///
/// GET /api/v1/recipes/by-name/{name}
pub async fn get_recipe_by_name(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> ApiResult<RecipeDto> {
    ok(state.recipes.find_recipe_by_name(&name).await?)
}

/// 创建菜谱及其步骤
///
/// POST /api/v1/recipes
pub async fn create_recipe(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRecipeRequest>,
) -> ApiResult<RecipeDto> {
    ok(state.recipes.create_recipe(req).await?)
}

/// 更新菜谱；提供 `steps` 时整体替换步骤列表
///
/// PUT /api/v1/recipes/{id}
pub async fn update_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateRecipeRequest>,
) -> ApiResult<RecipeDto> {
    ok(state.recipes.update_recipe(id, req).await?)
}

/// DELETE /api/v1/recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.recipes.delete_recipe(id).await?;
    done()
}

/// POST /api/v1/recipes/{id}/restore
pub async fn restore_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<()> {
    state.recipes.restore_recipe(id).await?;
    done()
}
