//! 数据库仓储层
//!
//! 每个实体一个仓储，封装参数化 SQL。
//!
//! ## 约定
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 查询只返回活跃记录（`deleted_at IS NULL`）
//! - 多语句写入在仓储内部开启事务
//! - 定义 trait 接口以支持 mock 测试

mod measure_repo;
mod recipe_repo;
mod role_repo;
mod step_repo;
mod storage_repo;
mod storage_type_repo;
mod tip_repo;
mod traits;
mod user_repo;

pub use measure_repo::MeasureRepository;
pub use recipe_repo::RecipeRepository;
pub use role_repo::RoleRepository;
pub use step_repo::StepRepository;
pub use storage_repo::StorageRepository;
pub use storage_type_repo::StorageTypeRepository;
pub use tip_repo::TipRepository;
pub use traits::*;
pub use user_repo::UserRepository;
