//! Recipe route handlers.
//!
//! Search and detail read straight from the catalog. The recommended feed is
//! the allergy-aware view: the caller's profile supplies the allergy text and
//! the safety partitioner splits the catalog before anything reaches the
//! browser. Generation proxies to the intelligence service.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use forkful_core::RecipeId;

use crate::db::{ProfileRepository, RecipeRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{RecipeDetail, RecipeSummary};
use crate::services::{GenerateRecipeRequest, GeneratedRecipe, PartitionedRecipes, partition_recipes};
use crate::state::AppState;

/// Query parameters for catalog search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Title substring, case-insensitive.
    pub q: Option<String>,
    /// Diet tag that must be present (e.g. "vegan").
    pub diet: Option<String>,
    /// Upper bound on cook time; recipes without one always pass.
    #[serde(rename = "maxTime")]
    pub max_time: Option<i32>,
}

/// Search the recipe catalog.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeSummary>>> {
    let repo = RecipeRepository::new(state.pool());
    let mut recipes = repo.search(params.q.as_deref()).await?;

    if let Some(diet) = &params.diet {
        recipes.retain(|r| r.tags.iter().any(|t| t.eq_ignore_ascii_case(diet)));
    }
    if let Some(max_time) = params.max_time {
        recipes.retain(|r| r.cook_time_minutes.is_none_or(|t| t <= max_time));
    }

    Ok(Json(recipes))
}

/// The allergy-partitioned catalog for the caller.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn recommended(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<PartitionedRecipes>> {
    let RequireUser(user) = user;

    let candidates = RecipeRepository::new(state.pool()).list_candidates().await?;
    let allergies = ProfileRepository::new(state.pool())
        .allergies_for(user.id)
        .await?;

    let partitioned = partition_recipes(
        state.intelligence(),
        &allergies,
        candidates,
        state.config().intelligence.check_concurrency,
    )
    .await;

    Ok(Json(partitioned))
}

/// Recipe detail by id.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetail>> {
    let id = RecipeId::new(id);
    let detail = RecipeRepository::new(state.pool()).get_detail(id).await?;
    detail
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("recipe {id}")))
}

/// Generate a recipe from the caller's ingredients via the intelligence
/// service.
#[instrument(skip(state, user, request), fields(user_id = %user.0.id))]
pub async fn generate(
    user: RequireUser,
    State(state): State<AppState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> Result<Json<GeneratedRecipe>> {
    if !request.ingredients.iter().any(|i| !i.trim().is_empty()) {
        return Err(AppError::Validation(
            "at least one ingredient is required".to_string(),
        ));
    }

    let recipe = state.intelligence().generate_recipe(&request).await?;
    Ok(Json(recipe))
}
