use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 菜谱
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 菜谱中的一个步骤及其顺序
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RecipeStep {
    pub recipe_id: i64,
    pub step_id: i64,
    pub name: String,
    pub place: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipeStep {
    pub step_id: i64,
    pub place: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub steps: Vec<NewRecipeStep>,
}
