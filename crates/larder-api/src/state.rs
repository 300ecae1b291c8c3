//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use larder_shared::config::AuthConfig;
use sqlx::PgPool;

use crate::auth::{JwtConfig, JwtManager};
use crate::repository::{
    MeasureRepository, RecipeRepository, RoleRepository, StepRepository, StorageRepository,
    StorageTypeRepository, TipRepository, UserRepository,
};
use crate::service::{
    AuthService, MeasureService, RecipeService, RoleService, StepService, StorageService,
    StorageTypeService, TipService, UserService,
};

/// Axum 应用共享状态
///
/// 服务通过 Arc 在 handler 间共享，克隆成本与连接池相同
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    pub auth: Arc<AuthService<UserRepository>>,
    pub roles: Arc<RoleService<RoleRepository>>,
    pub users: Arc<UserService<UserRepository, RoleRepository>>,
    pub storage_types: Arc<StorageTypeService<StorageTypeRepository, TipRepository>>,
    pub storages: Arc<StorageService<StorageRepository, TipRepository>>,
    pub tips: Arc<TipService<TipRepository>>,
    pub measures: Arc<MeasureService<MeasureRepository>>,
    pub steps: Arc<StepService<StepRepository>>,
    pub recipes: Arc<RecipeService<RecipeRepository>>,
    /// 认证 Cookie 是否带 Secure 标记
    pub cookie_secure: bool,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(pool: PgPool, auth: &AuthConfig) -> Self {
        let role_repo = Arc::new(RoleRepository::new(pool.clone()));
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let tip_repo = Arc::new(TipRepository::new(pool.clone()));

        let auth_service = AuthService::new(
            user_repo.clone(),
            JwtManager::new(JwtConfig::access(auth)),
            JwtManager::new(JwtConfig::refresh(auth)),
        );

        Self {
            auth: Arc::new(auth_service),
            roles: Arc::new(RoleService::new(role_repo.clone())),
            users: Arc::new(UserService::new(user_repo, role_repo)),
            storage_types: Arc::new(StorageTypeService::new(
                Arc::new(StorageTypeRepository::new(pool.clone())),
                tip_repo.clone(),
            )),
            storages: Arc::new(StorageService::new(
                Arc::new(StorageRepository::new(pool.clone())),
                tip_repo.clone(),
            )),
            tips: Arc::new(TipService::new(tip_repo)),
            measures: Arc::new(MeasureService::new(Arc::new(MeasureRepository::new(
                pool.clone(),
            )))),
            steps: Arc::new(StepService::new(Arc::new(StepRepository::new(pool.clone())))),
            recipes: Arc::new(RecipeService::new(Arc::new(RecipeRepository::new(
                pool.clone(),
            )))),
            cookie_secure: auth.cookie_secure,
            pool,
        }
    }
}
