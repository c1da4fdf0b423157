//! Rating route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use forkful_core::RecipeId;

use crate::db::RatingRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::Rating;
use crate::state::AppState;

/// Request body for rating a recipe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub recipe_id: Uuid,
    /// 1 to 5 stars.
    pub rating: i32,
    pub review: Option<String>,
}

/// Rate a recipe.
#[instrument(skip(state, user, request), fields(user_id = %user.0.id))]
pub async fn create(
    user: RequireUser,
    State(state): State<AppState>,
    Json(request): Json<CreateRatingRequest>,
) -> Result<Json<Rating>> {
    let RequireUser(user) = user;

    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let rating = RatingRepository::new(state.pool())
        .create(
            user.id,
            RecipeId::new(request.recipe_id),
            request.rating,
            request.review.as_deref(),
        )
        .await?;
    Ok(Json(rating))
}

/// Ratings for a recipe, newest first.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_for_recipe(
    user: RequireUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<Vec<Rating>>> {
    let ratings = RatingRepository::new(state.pool())
        .list_for_recipe(RecipeId::new(recipe_id))
        .await?;
    Ok(Json(ratings))
}
