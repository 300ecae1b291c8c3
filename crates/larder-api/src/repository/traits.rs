//! 仓储 Trait 定义
//!
//! 服务层依赖这些抽象而非具体实现，测试时使用 mockall 生成的 Mock

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ListQuery, Measure, NewRecipe, NewRecipeStep, NewStorage, NewUser, Recipe, RecipeStep, Role,
    Step, Storage, StorageType, Tip, User,
};

/// 角色仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Role>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Role>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, name: &str) -> Result<Role>;
    async fn update(&self, role: &Role) -> Result<Role>;
    /// 软删除，返回是否命中活跃记录
    async fn delete(&self, id: i64) -> Result<bool>;
    /// 恢复软删除，返回是否命中已删除记录
    async fn restore(&self, id: i64) -> Result<bool>;
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<User>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<User>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    /// 在同一事务中写入用户及其角色
    async fn create(&self, user: NewUser) -> Result<User>;
    async fn update(&self, user: &User) -> Result<User>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn restore(&self, id: i64) -> Result<bool>;

    // 用户角色
    async fn find_roles(&self, user_id: i64) -> Result<Vec<Role>>;
    /// 返回是否新增了关联（已存在时为 false）
    async fn add_role(&self, user_id: i64, role_id: i64) -> Result<bool>;
    async fn remove_role(&self, user_id: i64, role_id: i64) -> Result<bool>;
}

/// 存储类型仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageTypeRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<StorageType>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<StorageType>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, name: &str) -> Result<StorageType>;
    async fn update(&self, storage_type: &StorageType) -> Result<StorageType>;
    /// 硬删除
    async fn delete(&self, id: i64) -> Result<bool>;

    // 关联提示
    async fn find_tips(&self, id: i64) -> Result<Vec<Tip>>;
    async fn add_tip(&self, id: i64, tip_id: i64) -> Result<bool>;
    async fn remove_tip(&self, id: i64, tip_id: i64) -> Result<bool>;

    /// 该类型下的活跃存储位置
    async fn find_storages(&self, id: i64) -> Result<Vec<Storage>>;
}

/// 存储位置仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Storage>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Storage>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, storage: NewStorage) -> Result<Storage>;
    async fn update(&self, storage: &Storage) -> Result<Storage>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn restore(&self, id: i64) -> Result<bool>;

    // 关联提示
    async fn find_tips(&self, id: i64) -> Result<Vec<Tip>>;
    async fn add_tip(&self, id: i64, tip_id: i64) -> Result<bool>;
    async fn remove_tip(&self, id: i64, tip_id: i64) -> Result<bool>;
}

/// 提示仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TipRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tip>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Tip>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, description: &str) -> Result<Tip>;
    async fn update(&self, tip: &Tip) -> Result<Tip>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn restore(&self, id: i64) -> Result<bool>;
}

/// 计量单位仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasureRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Measure>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Measure>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, name: &str) -> Result<Measure>;
    async fn update(&self, measure: &Measure) -> Result<Measure>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// 步骤仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StepRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Step>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Step>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    async fn create(&self, name: &str) -> Result<Step>;
    async fn update(&self, step: &Step) -> Result<Step>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// 菜谱仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepositoryTrait: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>>;
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Recipe>>;
    async fn count(&self, query: &ListQuery) -> Result<i64>;
    /// 在同一事务中写入菜谱及其步骤
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe>;
    /// `steps` 为 `Some` 时在同一事务中替换步骤列表
    async fn update(&self, recipe: Recipe, steps: Option<Vec<NewRecipeStep>>) -> Result<Recipe>;
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn restore(&self, id: i64) -> Result<bool>;

    /// 批量查询多个菜谱的步骤
    async fn find_steps(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeStep>>;
}
