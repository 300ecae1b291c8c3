//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{MethodRouter, delete, get, post, put},
};

use crate::{handlers, middleware::auth_middleware, middleware::require_role, state::AppState};

/// 角色与用户写操作所需的角色
pub const ADMIN_ROLE: &str = "admin";

/// 为单个方法路由挂载管理员检查
///
/// 使用 `route_layer`，未注册的方法仍返回 405
fn admin_only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn(require_role(ADMIN_ROLE)))
}

/// 构建认证相关的路由
///
/// sign-up / login / refresh 为公开路由，logout / me 需要登录
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh_token))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// 构建角色与用户管理路由
///
/// 读操作只需登录，写操作与角色分配需要管理员角色
fn account_routes() -> Router<AppState> {
    Router::new()
        // 角色管理
        .route("/roles", get(handlers::role::list_roles))
        .route("/roles", admin_only(post(handlers::role::create_role)))
        .route("/roles/{id}", get(handlers::role::get_role))
        .route("/roles/{id}", admin_only(put(handlers::role::update_role)))
        .route("/roles/{id}", admin_only(delete(handlers::role::delete_role)))
        .route(
            "/roles/{id}/restore",
            admin_only(post(handlers::role::restore_role)),
        )
        // 用户管理
        .route("/users", get(handlers::user::list_users))
        .route("/users", admin_only(post(handlers::user::create_user)))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", admin_only(put(handlers::user::update_user)))
        .route("/users/{id}", admin_only(delete(handlers::user::delete_user)))
        .route(
            "/users/{id}/restore",
            admin_only(post(handlers::user::restore_user)),
        )
        .route("/users/{id}/roles", get(handlers::user::list_user_roles))
        .route(
            "/users/{id}/roles",
            admin_only(post(handlers::user::add_user_role)),
        )
        .route(
            "/users/{id}/roles/{role_id}",
            admin_only(delete(handlers::user::remove_user_role)),
        )
}

/// 构建存储相关路由
///
/// 包含存储类型、存储位置及其提示关联
fn storage_routes() -> Router<AppState> {
    Router::new()
        // 存储类型
        .route(
            "/storage-types",
            get(handlers::storage_type::list_storage_types),
        )
        .route(
            "/storage-types",
            post(handlers::storage_type::create_storage_type),
        )
        .route(
            "/storage-types/{id}",
            get(handlers::storage_type::get_storage_type),
        )
        .route(
            "/storage-types/{id}",
            put(handlers::storage_type::update_storage_type),
        )
        .route(
            "/storage-types/{id}",
            delete(handlers::storage_type::delete_storage_type),
        )
        .route(
            "/storage-types/{id}/tips",
            get(handlers::storage_type::list_storage_type_tips),
        )
        .route(
            "/storage-types/{id}/tips",
            post(handlers::storage_type::add_storage_type_tip),
        )
        .route(
            "/storage-types/{id}/tips/{tip_id}",
            delete(handlers::storage_type::remove_storage_type_tip),
        )
        .route(
            "/storage-types/{id}/storages",
            get(handlers::storage_type::list_storage_type_storages),
        )
        // 存储位置
        .route("/storages", get(handlers::storage::list_storages))
        .route("/storages", post(handlers::storage::create_storage))
        .route("/storages/{id}", get(handlers::storage::get_storage))
        .route("/storages/{id}", put(handlers::storage::update_storage))
        .route("/storages/{id}", delete(handlers::storage::delete_storage))
        .route(
            "/storages/{id}/restore",
            post(handlers::storage::restore_storage),
        )
        .route(
            "/storages/{id}/tips",
            get(handlers::storage::list_storage_tips),
        )
        .route(
            "/storages/{id}/tips",
            post(handlers::storage::add_storage_tip),
        )
        .route(
            "/storages/{id}/tips/{tip_id}",
            delete(handlers::storage::remove_storage_tip),
        )
        // 提示
        .route("/tips", get(handlers::tip::list_tips))
        .route("/tips", post(handlers::tip::create_tip))
        .route("/tips/{id}", get(handlers::tip::get_tip))
        .route("/tips/{id}", put(handlers::tip::update_tip))
        .route("/tips/{id}", delete(handlers::tip::delete_tip))
        .route("/tips/{id}/restore", post(handlers::tip::restore_tip))
}

/// 构建菜谱相关路由
///
/// 包含计量单位、步骤与菜谱
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/measures", get(handlers::measure::list_measures))
        .route("/measures", post(handlers::measure::create_measure))
        .route("/measures/{id}", get(handlers::measure::get_measure))
        .route("/measures/{id}", put(handlers::measure::update_measure))
        .route("/measures/{id}", delete(handlers::measure::delete_measure))
        .route("/steps", get(handlers::step::list_steps))
        .route("/steps", post(handlers::step::create_step))
        .route("/steps/{id}", get(handlers::step::get_step))
        .route("/steps/{id}", put(handlers::step::update_step))
        .route("/steps/{id}", delete(handlers::step::delete_step))
        .route("/recipes", get(handlers::recipe::list_recipes))
        .route("/recipes", post(handlers::recipe::create_recipe))
        .route(
            "/recipes/by-name/{name}",
            get(handlers::recipe::get_recipe_by_name),
        )
        .route("/recipes/{id}", get(handlers::recipe::get_recipe))
        .route("/recipes/{id}", put(handlers::recipe::update_recipe))
        .route("/recipes/{id}", delete(handlers::recipe::delete_recipe))
        .route(
            "/recipes/{id}/restore",
            post(handlers::recipe::restore_recipe),
        )
}

/// 构建所有 `/api/v1` 下的路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(storage_routes())
        .merge(recipe_routes())
}

/// 构建完整应用路由：API、健康检查与认证中间件
///
/// 认证中间件只作用于已匹配的路由，未知路径直接返回 404。
/// CORS、超时与可观测性中间件由 `main` 在外层挂载
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_construction() {
        // 重复路径或冲突的方法会在构建时 panic
        let _router: Router<AppState> = api_routes();
    }
}
