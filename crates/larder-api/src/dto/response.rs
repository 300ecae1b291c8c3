//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Measure, Recipe, RecipeStep, Role, Step, Storage, StorageType, Tip, User};

/// 列表响应
///
/// `count` 是满足过滤条件的记录总数，与分页无关
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, count: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            count,
            limit,
            offset,
        }
    }
}

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// 用户响应，不包含密码哈希
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    /// 角色名列表
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDto {
    pub fn from_model(user: User, roles: Vec<Role>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            roles: roles.into_iter().map(|r| r.name).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageTypeDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<StorageType> for StorageTypeDto {
    fn from(storage_type: StorageType) -> Self {
        Self {
            id: storage_type.id,
            name: storage_type.name,
            created_at: storage_type.created_at,
        }
    }
}

/// 存储位置中内嵌的类型摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageTypeRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageDto {
    pub id: i64,
    pub name: String,
    pub temperature: f32,
    pub humidity: f32,
    #[serde(rename = "type")]
    pub storage_type: StorageTypeRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Storage> for StorageDto {
    fn from(storage: Storage) -> Self {
        Self {
            id: storage.id,
            name: storage.name,
            temperature: storage.temperature,
            humidity: storage.humidity,
            storage_type: StorageTypeRef {
                id: storage.type_id,
                name: storage.type_name,
            },
            created_at: storage.created_at,
            updated_at: storage.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TipDto {
    pub id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tip> for TipDto {
    fn from(tip: Tip) -> Self {
        Self {
            id: tip.id,
            description: tip.description,
            created_at: tip.created_at,
            updated_at: tip.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Measure> for MeasureDto {
    fn from(measure: Measure) -> Self {
        Self {
            id: measure.id,
            name: measure.name,
            created_at: measure.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Step> for StepDto {
    fn from(step: Step) -> Self {
        Self {
            id: step.id,
            name: step.name,
            created_at: step.created_at,
        }
    }
}

/// 菜谱中的步骤
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepDto {
    pub id: i64,
    pub name: String,
    pub place: i32,
}

impl From<RecipeStep> for RecipeStepDto {
    fn from(step: RecipeStep) -> Self {
        Self {
            id: step.step_id,
            name: step.name,
            place: step.place,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 按 place 升序
    pub steps: Vec<RecipeStepDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeDto {
    pub fn from_model(recipe: Recipe, mut steps: Vec<RecipeStep>) -> Self {
        steps.sort_by_key(|s| (s.place, s.step_id));
        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            steps: steps.into_iter().map(RecipeStepDto::from).collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    /// access token 过期时间（Unix 秒）
    pub access_token_expires_at: i64,
    pub refresh_token: String,
    pub refresh_token_expires_at: i64,
    pub token_type: String,
    pub user: UserDto,
}

/// 刷新 Token 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub access_token_expires_at: i64,
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_api_response_envelope() {
        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["data"], 1);

        let json = serde_json::to_value(ApiResponse::<()>::success_empty()).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_list_response_shape() {
        let json = serde_json::to_value(ListResponse::new(vec!["a", "b"], 12, 2, 4)).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert_eq!(json["count"], 12);
        assert_eq!(json["limit"], 2);
        assert_eq!(json["offset"], 4);
    }

    #[test]
    fn test_storage_dto_nests_type() {
        let storage = Storage {
            id: 3,
            name: "Kitchen fridge".to_string(),
            temperature: 4.0,
            humidity: 40.0,
            type_id: 1,
            type_name: "Fridge".to_string(),
            created_at: now(),
            updated_at: now(),
        };

        let json = serde_json::to_value(StorageDto::from(storage)).unwrap();
        assert_eq!(json["type"]["id"], 1);
        assert_eq!(json["type"]["name"], "Fridge");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_recipe_steps_sorted_by_place() {
        let recipe = Recipe {
            id: 1,
            name: "Bread".to_string(),
            description: String::new(),
            created_at: now(),
            updated_at: now(),
        };
        let steps = vec![
            RecipeStep { recipe_id: 1, step_id: 9, name: "Bake".to_string(), place: 2 },
            RecipeStep { recipe_id: 1, step_id: 4, name: "Mix".to_string(), place: 0 },
            RecipeStep { recipe_id: 1, step_id: 5, name: "Proof".to_string(), place: 1 },
        ];

        let dto = RecipeDto::from_model(recipe, steps);
        let names: Vec<_> = dto.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mix", "Proof", "Bake"]);
        assert_eq!(dto.steps[0].id, 4);
    }

    #[test]
    fn test_user_dto_has_no_password() {
        let user = User {
            id: 1,
            name: "alice".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            created_at: now(),
            updated_at: now(),
        };
        let role = Role {
            id: 1,
            name: "admin".to_string(),
            created_at: now(),
            updated_at: now(),
        };

        let json = serde_json::to_value(UserDto::from_model(user, vec![role])).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["roles"][0], "admin");
    }
}
