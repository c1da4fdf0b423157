//! Shopping list route handlers.
//!
//! Submissions arrive as raw ingredient lines (typically a whole recipe's
//! list at once). Each line is normalized to its canonical key and merged
//! into the caller's list by the repository's atomic upsert; lines that
//! normalize to the same key as an existing entry increment its quantity
//! instead of creating a duplicate.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use forkful_core::{IngredientKey, Quantity, ShoppingEntryId};

use crate::db::ShoppingListRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::ShoppingListEntry;
use crate::state::AppState;

/// Request body for submitting ingredient lines.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemsRequest {
    /// Raw ingredient lines as typed or as listed on a recipe.
    pub items: Vec<String>,
    /// Quantity credited per line (default 1).
    pub quantity_delta: Option<i32>,
}

/// Request body for adjusting an entry's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// Signed adjustment; the stored quantity never drops below 1.
    pub delta: i32,
}

/// Response body for quantity adjustments.
#[derive(Debug, Serialize)]
pub struct UpdateQuantityResponse {
    pub quantity: i32,
}

/// Request body for the checked flag.
#[derive(Debug, Deserialize)]
pub struct SetCheckedRequest {
    pub checked: bool,
}

/// List the caller's shopping list.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list(
    user: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ShoppingListEntry>>> {
    let RequireUser(user) = user;
    let entries = ShoppingListRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(entries))
}

/// Merge submitted ingredient lines into the caller's shopping list.
///
/// The whole request is validated before any line touches the store, so the
/// response is either every affected entry (in submission order) or an error.
#[instrument(skip(state, user, request), fields(user_id = %user.0.id, items = request.items.len()))]
pub async fn add(
    user: RequireUser,
    State(state): State<AppState>,
    Json(request): Json<AddItemsRequest>,
) -> Result<Json<Vec<ShoppingListEntry>>> {
    let RequireUser(user) = user;

    if request.items.is_empty() {
        return Err(AppError::Validation("items must not be empty".to_string()));
    }
    let delta = request.quantity_delta.unwrap_or(1);
    if delta < 1 {
        return Err(AppError::Validation(
            "quantityDelta must be at least 1".to_string(),
        ));
    }
    let delta = Quantity::clamped(delta);

    let mut lines = Vec::with_capacity(request.items.len());
    for raw in &request.items {
        let trimmed = raw.trim();
        let key = IngredientKey::derive(trimmed);
        if key.is_empty() {
            return Err(AppError::Validation(format!(
                "ingredient {raw:?} is empty after normalization"
            )));
        }
        lines.push((trimmed, key));
    }

    let repo = ShoppingListRepository::new(state.pool());
    let mut entries = Vec::with_capacity(lines.len());
    for (raw, key) in lines {
        let entry = repo.upsert_item(user.id, raw, &key, delta).await?;
        entries.push(entry);
    }

    Ok(Json(entries))
}

/// Apply a quantity delta to an entry, clamped to a floor of 1.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn update_quantity(
    user: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<UpdateQuantityResponse>> {
    let RequireUser(user) = user;
    let quantity = ShoppingListRepository::new(state.pool())
        .update_quantity(ShoppingEntryId::new(id), user.id, request.delta)
        .await?;
    Ok(Json(UpdateQuantityResponse {
        quantity: quantity.get(),
    }))
}

/// Set the checked flag on an entry.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn set_checked(
    user: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetCheckedRequest>,
) -> Result<Json<ShoppingListEntry>> {
    let RequireUser(user) = user;
    let entry = ShoppingListRepository::new(state.pool())
        .set_checked(ShoppingEntryId::new(id), user.id, request.checked)
        .await?;
    Ok(Json(entry))
}

/// Delete an entry owned by the caller.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn remove(
    user: RequireUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let RequireUser(user) = user;
    ShoppingListRepository::new(state.pool())
        .remove(ShoppingEntryId::new(id), user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
