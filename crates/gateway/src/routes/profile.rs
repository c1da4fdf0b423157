//! Profile route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::ProfileRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{ProfileUpdate, UserProfile};
use crate::state::AppState;

/// Fetch the caller's profile.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn show(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>> {
    let RequireUser(user) = user;
    let profile = ProfileRepository::new(state.pool()).get(user.id).await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound("profile".to_string()))
}

/// Create or partially update the caller's profile.
#[instrument(skip(state, user, update), fields(user_id = %user.0.id))]
pub async fn update(
    user: RequireUser,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    let RequireUser(user) = user;
    let profile = ProfileRepository::new(state.pool())
        .upsert(user.id, update)
        .await?;
    Ok(Json(profile))
}
