//! Shopping list domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forkful_core::{IngredientKey, Quantity, ShoppingEntryId, UserId};

/// One merged line on a user's shopping list.
///
/// `ingredient` is the raw text as last submitted; `ingredient_key` is the
/// canonical form it merges on. At most one entry exists per
/// (user, ingredient key), enforced by the database.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    pub id: ShoppingEntryId,
    pub user_id: UserId,
    pub ingredient: String,
    pub ingredient_key: IngredientKey,
    pub quantity: Quantity,
    pub checked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
