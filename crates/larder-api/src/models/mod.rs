//! 数据库实体模型
//!
//! 与表结构一一对应，只在仓储层和服务层之间流转，不直接序列化给客户端

mod recipe;
mod role;
mod storage;
mod tip;
mod unit;
mod user;

pub use recipe::{NewRecipe, NewRecipeStep, Recipe, RecipeStep};
pub use role::Role;
pub use storage::{NewStorage, Storage, StorageType};
pub use tip::Tip;
pub use unit::{Measure, Step};
pub use user::{NewUser, User};

/// 列表查询条件
///
/// `search` 以 `ILIKE '%search%'` 匹配，空串匹配全部
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub search: String,
    pub limit: i64,
    pub offset: i64,
}

impl ListQuery {
    /// 转义 LIKE 通配符后拼出模式串
    pub fn pattern(&self) -> String {
        let escaped = self
            .search
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_empty_matches_all() {
        let query = ListQuery::default();
        assert_eq!(query.pattern(), "%%");
    }

    #[test]
    fn test_pattern_escapes_wildcards() {
        let query = ListQuery {
            search: "50%_off".to_string(),
            ..Default::default()
        };
        assert_eq!(query.pattern(), "%50\\%\\_off%");
    }
}
