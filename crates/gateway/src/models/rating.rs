//! Recipe rating domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forkful_core::{RatingId, RecipeId, UserId};

/// A user's rating of a recipe, with an optional written review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: RatingId,
    pub recipe_id: RecipeId,
    pub user_id: UserId,
    /// 1 to 5 stars.
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}
