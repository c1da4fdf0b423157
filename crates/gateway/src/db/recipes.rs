//! Recipe catalog repository (read-only).
//!
//! Tags and ingredients hang off recipes via join tables, so list queries
//! fetch the base rows first and the related names with one `ANY($1)` query,
//! then stitch the results in memory.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use forkful_core::RecipeId;

use super::RepositoryError;
use crate::models::{CandidateRecipe, RecipeDetail, RecipeSummary};

/// Cap on rows returned by a catalog search.
const SEARCH_LIMIT: i64 = 120;

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    image_url: Option<String>,
    cook_time_minutes: Option<i32>,
    difficulty: Option<String>,
    rating: Option<f32>,
    calories: Option<i32>,
}

#[derive(sqlx::FromRow)]
struct TagRow {
    recipe_id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    recipe_id: Uuid,
    name: String,
    quantity: Option<String>,
}

#[derive(sqlx::FromRow)]
struct StepRow {
    instruction: String,
}

impl RecipeRow {
    fn into_summary(self, tags: Vec<String>) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::new(self.id),
            title: self.title,
            image_url: self.image_url,
            cook_time_minutes: self.cook_time_minutes,
            difficulty: self.difficulty,
            rating: self.rating,
            calories: self.calories,
            tags,
        }
    }
}

impl IngredientRow {
    /// Display line: "quantity name" when a quantity is recorded.
    fn display_line(&self) -> String {
        match &self.quantity {
            Some(q) if !q.is_empty() => format!("{q} {}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Repository for recipe catalog reads.
pub struct RecipeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RecipeRepository<'a> {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search the catalog by title substring (case-insensitive).
    ///
    /// `None` returns the newest `SEARCH_LIMIT` recipes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(&self, title: Option<&str>) -> Result<Vec<RecipeSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, description, image_url, cook_time_minutes,
                   difficulty, rating, calories
            FROM recipes
            WHERE $1::text IS NULL OR title ILIKE '%' || $1 || '%'
            ORDER BY created_at DESC
            LIMIT $2
            ",
        )
        .bind(title)
        .bind(SEARCH_LIMIT)
        .fetch_all(self.pool)
        .await?;

        let mut tags = self.tags_for(rows.iter().map(|r| r.id).collect()).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let recipe_tags = tags.remove(&r.id).unwrap_or_default();
                r.into_summary(recipe_tags)
            })
            .collect())
    }

    /// Load the whole catalog with ingredient names, for safety partitioning.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_candidates(&self) -> Result<Vec<CandidateRecipe>, RepositoryError> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, description, image_url, cook_time_minutes,
                   difficulty, rating, calories
            FROM recipes
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut tags = self.tags_for(ids.clone()).await?;

        let ingredient_rows = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT recipe_id, name, quantity
            FROM ingredients
            WHERE recipe_id = ANY($1)
            ORDER BY recipe_id, position
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut ingredients: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in ingredient_rows {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(row.name);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let id = r.id;
                CandidateRecipe {
                    summary: r.into_summary(tags.remove(&id).unwrap_or_default()),
                    ingredients: ingredients.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Load a single recipe with ingredients, steps, and tags.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_detail(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r"
            SELECT id, title, description, image_url, cook_time_minutes,
                   difficulty, rating, calories
            FROM recipes
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredient_rows = sqlx::query_as::<_, IngredientRow>(
            r"
            SELECT recipe_id, name, quantity
            FROM ingredients
            WHERE recipe_id = $1
            ORDER BY position
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let steps = sqlx::query_as::<_, StepRow>(
            r"
            SELECT instruction
            FROM steps
            WHERE recipe_id = $1
            ORDER BY step_number
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let mut tags = self.tags_for(vec![row.id]).await?;
        let recipe_tags = tags.remove(&row.id).unwrap_or_default();

        Ok(Some(RecipeDetail {
            id: RecipeId::new(row.id),
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            cook_time_minutes: row.cook_time_minutes,
            difficulty: row.difficulty,
            rating: row.rating,
            calories: row.calories,
            tags: recipe_tags,
            ingredients: ingredient_rows.iter().map(IngredientRow::display_line).collect(),
            steps: steps.into_iter().map(|s| s.instruction).collect(),
        }))
    }

    /// Tag names grouped by recipe id.
    async fn tags_for(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<String>>, RepositoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, TagRow>(
            r"
            SELECT rt.recipe_id, t.name
            FROM recipe_tags rt
            JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.name
            ",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            grouped.entry(row.recipe_id).or_default().push(row.name);
        }
        Ok(grouped)
    }
}
