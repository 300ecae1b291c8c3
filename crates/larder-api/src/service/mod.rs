//! 服务层
//!
//! 协调仓储层完成业务操作，负责 DTO 与模型之间的转换以及部分更新的合并。
//!
//! ## 模块结构
//!
//! - `auth_service`: 注册、登录、刷新 Token
//! - 其余每个实体一个服务

mod auth_service;
mod measure_service;
mod recipe_service;
mod role_service;
mod step_service;
mod storage_service;
mod storage_type_service;
mod tip_service;
mod user_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use measure_service::MeasureService;
pub use recipe_service::RecipeService;
pub use role_service::RoleService;
pub use step_service::StepService;
pub use storage_service::StorageService;
pub use storage_type_service::StorageTypeService;
pub use tip_service::TipService;
pub use user_service::UserService;

use larder_shared::observability::metrics;

use crate::error::{ApiError, Result};

/// 必填文本：去除首尾空白后不能为空
pub(crate) fn required_text(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{} 不能为空", field)));
    }
    Ok(value.to_string())
}

/// 部分更新：`None` 或空白字符串保留原值
pub(crate) fn merge_text(current: &mut String, incoming: Option<String>) {
    if let Some(value) = incoming
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        *current = value;
    }
}

/// 仓储返回 `false`（未命中任何行）时视为记录不存在
pub(crate) fn require_hit(hit: Result<bool>, entity: &'static str, id: i64) -> Result<()> {
    if hit? {
        Ok(())
    } else {
        Err(ApiError::not_found(entity, id))
    }
}

/// 记录实体写操作的结果指标
pub(crate) fn record_outcome<T>(entity: &str, operation: &str, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.error_code(),
    };
    metrics::record_entity_operation(entity, operation, outcome);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_text_keeps_value_on_absent_or_blank() {
        let mut name = "Fridge".to_string();

        merge_text(&mut name, None);
        assert_eq!(name, "Fridge");

        merge_text(&mut name, Some("   ".to_string()));
        assert_eq!(name, "Fridge");

        merge_text(&mut name, Some(" Freezer ".to_string()));
        assert_eq!(name, "Freezer");
    }

    #[test]
    fn test_required_text_rejects_blank() {
        assert!(required_text("  ", "name").is_err());
        assert_eq!(required_text(" salt ", "name").unwrap(), "salt");
    }
}
