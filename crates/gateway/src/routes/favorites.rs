//! Favorites route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use forkful_core::RecipeId;

use crate::db::FavoriteRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// List the caller's favorite recipe ids, newest first.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeId>>> {
    let RequireUser(user) = user;
    let favorites = FavoriteRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(favorites))
}

/// Mark a recipe as a favorite.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn add(
    user: RequireUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode> {
    let RequireUser(user) = user;
    FavoriteRepository::new(state.pool())
        .add(user.id, RecipeId::new(recipe_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a recipe from the caller's favorites.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn remove(
    user: RequireUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<Uuid>,
) -> Result<StatusCode> {
    let RequireUser(user) = user;
    FavoriteRepository::new(state.pool())
        .remove(user.id, RecipeId::new(recipe_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
