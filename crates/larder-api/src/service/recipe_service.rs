//! 菜谱服务
//!
//! 菜谱总是带着按 place 排序的步骤返回

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{info, instrument};

use super::{merge_text, record_outcome, require_hit, required_text};
use crate::dto::{
    CreateRecipeRequest, ListResponse, NameFilter, RecipeDto, RecipeStepInput, UpdateRecipeRequest,
};
use crate::error::{ApiError, Result};
use crate::models::{NewRecipe, NewRecipeStep, Recipe, RecipeStep};
use crate::repository::RecipeRepositoryTrait;

const ENTITY: &str = "recipe";

/// 校验步骤列表：同一步骤不能出现两次
fn to_new_steps(steps: Vec<RecipeStepInput>) -> Result<Vec<NewRecipeStep>> {
    let mut seen = HashSet::with_capacity(steps.len());
    for step in &steps {
        if !seen.insert(step.id) {
            return Err(ApiError::Validation(format!("步骤 {} 重复出现", step.id)));
        }
    }
    Ok(steps.into_iter().map(NewRecipeStep::from).collect())
}

pub struct RecipeService<R: RecipeRepositoryTrait> {
    repo: Arc<R>,
}

impl<R: RecipeRepositoryTrait> RecipeService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    async fn with_steps(&self, recipe: Recipe) -> Result<RecipeDto> {
        let steps = self.repo.find_steps(&[recipe.id]).await?;
        Ok(RecipeDto::from_model(recipe, steps))
    }

    #[instrument(skip(self))]
    pub async fn find_recipes(&self, filter: NameFilter) -> Result<ListResponse<RecipeDto>> {
        let query = filter.into_query();
        let recipes = self.repo.find_many(&query).await?;
        let count = self.repo.count(&query).await?;

        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        let mut steps_by_recipe: HashMap<i64, Vec<RecipeStep>> = HashMap::new();
        for step in self.repo.find_steps(&ids).await? {
            steps_by_recipe.entry(step.recipe_id).or_default().push(step);
        }

        let items = recipes
            .into_iter()
            .map(|recipe| {
                let steps = steps_by_recipe.remove(&recipe.id).unwrap_or_default();
                RecipeDto::from_model(recipe, steps)
            })
            .collect();

        Ok(ListResponse::new(items, count, query.limit, query.offset))
    }

    #[instrument(skip(self))]
    pub async fn find_recipe(&self, id: i64) -> Result<RecipeDto> {
        let recipe = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(ENTITY, id))?;
        self.with_steps(recipe).await
    }

    #[instrument(skip(self))]
    pub async fn find_recipe_by_name(&self, name: &str) -> Result<RecipeDto> {
        let recipe = self
            .repo
            .find_by_name(name.trim())
            .await?
            .ok_or_else(|| ApiError::not_found(ENTITY, name))?;
        self.with_steps(recipe).await
    }

    /// 步骤 ID 不存在时由外键约束返回 400
    #[instrument(skip(self, req), fields(steps = req.steps.len()))]
    pub async fn create_recipe(&self, req: CreateRecipeRequest) -> Result<RecipeDto> {
        let result = async {
            let recipe = NewRecipe {
                name: required_text(&req.name, "name")?,
                description: req.description.trim().to_string(),
                steps: to_new_steps(req.steps)?,
            };
            self.repo.create(recipe).await
        }
        .await;
        record_outcome(ENTITY, "create", &result);

        let recipe = result?;
        info!(recipe_id = recipe.id, name = %recipe.name, "Recipe created");
        self.with_steps(recipe).await
    }

    #[instrument(skip(self, req))]
    pub async fn update_recipe(&self, id: i64, req: UpdateRecipeRequest) -> Result<RecipeDto> {
        let result = async {
            let mut recipe = self
                .repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| ApiError::not_found(ENTITY, id))?;

            merge_text(&mut recipe.name, req.name);
            merge_text(&mut recipe.description, req.description);
            let steps = req.steps.map(to_new_steps).transpose()?;

            self.repo.update(recipe, steps).await
        }
        .await;
        record_outcome(ENTITY, "update", &result);

        self.with_steps(result?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.delete(id).await, ENTITY, id);
        record_outcome(ENTITY, "delete", &result);

        if result.is_ok() {
            info!(recipe_id = id, "Recipe soft-deleted");
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn restore_recipe(&self, id: i64) -> Result<()> {
        let result = require_hit(self.repo.restore(id).await, ENTITY, id);
        record_outcome(ENTITY, "restore", &result);
        result
    }
}
