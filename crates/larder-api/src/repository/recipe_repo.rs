//! 菜谱仓储
//!
//! 菜谱与其步骤列表（`recipes_steps`）总是在同一事务中写入

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use super::traits::RecipeRepositoryTrait;
use crate::error::{ApiError, Result};
use crate::models::{ListQuery, NewRecipe, NewRecipeStep, Recipe, RecipeStep};

pub struct RecipeRepository {
    pool: PgPool,
}

impl RecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 在事务中替换菜谱的步骤列表
    pub async fn replace_steps_in_tx(
        tx: &mut PgConnection,
        recipe_id: i64,
        steps: &[NewRecipeStep],
    ) -> Result<()> {
        sqlx::query("DELETE FROM recipes_steps WHERE id_recipe = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        if steps.is_empty() {
            return Ok(());
        }

        let step_ids: Vec<i64> = steps.iter().map(|s| s.step_id).collect();
        let places: Vec<i32> = steps.iter().map(|s| s.place).collect();

        sqlx::query(
            r#"
            INSERT INTO recipes_steps (id_recipe, id_step, place)
            SELECT $1, s.id_step, s.place
            FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS s(id_step, place)
            "#,
        )
        .bind(recipe_id)
        .bind(&step_ids)
        .bind(&places)
        .execute(&mut *tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RecipeRepositoryTrait for RecipeRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM recipes
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(recipe)
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM recipes
            WHERE name = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(recipe)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &ListQuery) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM recipes
            WHERE deleted_at IS NULL AND name ILIKE $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.pattern())
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(recipes)
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ListQuery) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM recipes WHERE deleted_at IS NULL AND name ILIKE $1",
        )
        .bind(query.pattern())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[instrument(skip(self, recipe), fields(name = %recipe.name, steps = recipe.steps.len()))]
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(&recipe.name)
        .bind(&recipe.description)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_steps_in_tx(&mut *tx, created.id, &recipe.steps).await?;

        tx.commit().await?;
        Ok(created)
    }

    #[instrument(skip(self, recipe, steps), fields(recipe_id = recipe.id))]
    async fn update(&self, recipe: Recipe, steps: Option<Vec<NewRecipeStep>>) -> Result<Recipe> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
            SET name = $2, description = $3, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(recipe.id)
        .bind(&recipe.name)
        .bind(&recipe.description)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("recipe", recipe.id))?;

        if let Some(steps) = steps {
            Self::replace_steps_in_tx(&mut *tx, updated.id, &steps).await?;
        }

        tx.commit().await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE recipes SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn restore(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE recipes SET deleted_at = NULL, updated_at = NOW() WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_steps(&self, recipe_ids: &[i64]) -> Result<Vec<RecipeStep>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let steps = sqlx::query_as::<_, RecipeStep>(
            r#"
            SELECT rs.id_recipe AS recipe_id, rs.id_step AS step_id, s.name, rs.place
            FROM recipes_steps rs
            JOIN steps s ON s.id = rs.id_step
            WHERE rs.id_recipe = ANY($1)
            ORDER BY rs.id_recipe ASC, rs.place ASC, rs.id_step ASC
            "#,
        )
        .bind(recipe_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(steps)
    }
}
