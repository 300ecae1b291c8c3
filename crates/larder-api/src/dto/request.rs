//! 请求 DTO 定义
//!
//! 所有 REST API 的查询参数和请求体结构

use serde::Deserialize;
use validator::Validate;

use crate::models::{ListQuery, NewRecipeStep};

/// 默认每页条数
pub const DEFAULT_LIMIT: i64 = 10;
/// 每页条数上限
pub const MAX_LIMIT: i64 = 100;

/// 分页参数归一化：limit 限制在 1..=100，offset 不小于 0
pub fn normalize_paging(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        offset.unwrap_or(0).max(0),
    )
}

/// 按名称过滤的列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub name: Option<String>,
}

impl NameFilter {
    pub fn into_query(self) -> ListQuery {
        let (limit, offset) = normalize_paging(self.limit, self.offset);
        ListQuery {
            search: self.name.unwrap_or_default().trim().to_string(),
            limit,
            offset,
        }
    }
}

/// 按描述过滤的提示列表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub description: Option<String>,
}

impl TipFilter {
    pub fn into_query(self) -> ListQuery {
        let (limit, offset) = normalize_paging(self.limit, self.offset);
        ListQuery {
            search: self.description.unwrap_or_default().trim().to_string(),
            limit,
            offset,
        }
    }
}

// ==================== 角色 ====================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 50, message = "角色名称长度必须在1-50个字符之间"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[validate(length(max = 50, message = "角色名称不能超过50个字符"))]
    pub name: Option<String>,
}

// ==================== 用户 ====================

/// 管理员创建用户请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "用户名长度必须在3-50个字符之间"))]
    pub name: String,
    #[validate(length(min = 6, max = 128, message = "密码长度必须在6-128个字符之间"))]
    pub password: String,
    /// 角色 ID 列表
    #[serde(default)]
    pub roles: Vec<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = 50, message = "用户名不能超过50个字符"))]
    pub name: Option<String>,
}

/// 为用户分配角色
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub role_id: i64,
}

// ==================== 存储类型 / 存储位置 ====================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorageTypeRequest {
    #[validate(length(min = 1, max = 100, message = "存储类型名称长度必须在1-100个字符之间"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorageTypeRequest {
    #[validate(length(max = 100, message = "存储类型名称不能超过100个字符"))]
    pub name: Option<String>,
}

/// 关联提示
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTipRequest {
    pub tip_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorageRequest {
    #[validate(length(min = 1, max = 100, message = "存储位置名称长度必须在1-100个字符之间"))]
    pub name: String,
    /// 温度（摄氏度）
    #[validate(range(min = -100.0, max = 100.0, message = "温度必须在-100到100之间"))]
    #[serde(default)]
    pub temperature: f32,
    /// 相对湿度（百分比）
    #[validate(range(min = 0.0, max = 100.0, message = "湿度必须在0到100之间"))]
    #[serde(default)]
    pub humidity: f32,
    pub type_id: i64,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStorageRequest {
    #[validate(length(max = 100, message = "存储位置名称不能超过100个字符"))]
    pub name: Option<String>,
    #[validate(range(min = -100.0, max = 100.0, message = "温度必须在-100到100之间"))]
    pub temperature: Option<f32>,
    #[validate(range(min = 0.0, max = 100.0, message = "湿度必须在0到100之间"))]
    pub humidity: Option<f32>,
    pub type_id: Option<i64>,
}

// ==================== 提示 ====================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTipRequest {
    #[validate(length(min = 1, max = 1000, message = "提示内容长度必须在1-1000个字符之间"))]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTipRequest {
    #[validate(length(max = 1000, message = "提示内容不能超过1000个字符"))]
    pub description: Option<String>,
}

// ==================== 计量单位 / 步骤 ====================

/// 创建计量单位或步骤（两者只有名称）
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasureRequest {
    #[validate(length(min = 1, max = 50, message = "计量单位名称长度必须在1-50个字符之间"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeasureRequest {
    #[validate(length(max = 50, message = "计量单位名称不能超过50个字符"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStepRequest {
    #[validate(length(min = 1, max = 255, message = "步骤名称长度必须在1-255个字符之间"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStepRequest {
    #[validate(length(max = 255, message = "步骤名称不能超过255个字符"))]
    pub name: Option<String>,
}

// ==================== 菜谱 ====================

/// 菜谱中引用的步骤
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepInput {
    /// 步骤 ID
    pub id: i64,
    /// 顺序，从 0 开始
    #[validate(range(min = 0, message = "步骤顺序不能为负数"))]
    pub place: i32,
}

impl From<RecipeStepInput> for NewRecipeStep {
    fn from(input: RecipeStepInput) -> Self {
        Self {
            step_id: input.id,
            place: input.place,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    #[validate(length(min = 1, max = 100, message = "菜谱名称长度必须在1-100个字符之间"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "菜谱描述不能超过5000个字符"))]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub steps: Vec<RecipeStepInput>,
}

/// 更新菜谱；`steps` 存在时整体替换步骤列表
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    #[validate(length(max = 100, message = "菜谱名称不能超过100个字符"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "菜谱描述不能超过5000个字符"))]
    pub description: Option<String>,
    #[validate(nested)]
    pub steps: Option<Vec<RecipeStepInput>>,
}

// ==================== 认证 ====================

/// 自助注册请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 50, message = "用户名长度必须在3-50个字符之间"))]
    pub name: String,
    #[validate(length(min = 6, max = 128, message = "密码长度必须在6-128个字符之间"))]
    pub password: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "用户名不能为空"))]
    pub name: String,
    #[validate(length(min = 1, message = "密码不能为空"))]
    pub password: String,
}

/// 刷新 Token 请求；缺省时从 `refresh_token` Cookie 读取
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}
