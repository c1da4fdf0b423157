//! Recipe domain types.
//!
//! Recipes are read-only from the gateway's perspective: the catalog lives in
//! `PostgreSQL` and is maintained out of band.

use serde::Serialize;

use forkful_core::RecipeId;

/// A recipe as listed in search results and recommendation buckets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub title: String,
    pub image_url: Option<String>,
    pub cook_time_minutes: Option<i32>,
    pub difficulty: Option<String>,
    pub rating: Option<f32>,
    pub calories: Option<i32>,
    pub tags: Vec<String>,
}

/// A recipe with its full ingredient list and steps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: RecipeId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cook_time_minutes: Option<i32>,
    pub difficulty: Option<String>,
    pub rating: Option<f32>,
    pub calories: Option<i32>,
    pub tags: Vec<String>,
    /// Display lines, "quantity name" when a quantity is recorded.
    pub ingredients: Vec<String>,
    /// Instructions ordered by step number.
    pub steps: Vec<String>,
}

/// A recipe queued for allergy classification: the summary that will be
/// returned to the client plus the raw ingredient names the classifier sees.
#[derive(Debug, Clone)]
pub struct CandidateRecipe {
    pub summary: RecipeSummary,
    pub ingredients: Vec<String>,
}
