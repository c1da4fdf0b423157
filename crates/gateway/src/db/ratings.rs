//! Ratings repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use forkful_core::{RatingId, RecipeId, UserId};

use super::RepositoryError;
use crate::models::Rating;

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: Uuid,
    recipe_id: Uuid,
    user_id: Uuid,
    rating: i32,
    review: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            id: RatingId::new(row.id),
            recipe_id: RecipeId::new(row.recipe_id),
            user_id: UserId::new(row.user_id),
            rating: row.rating,
            review: row.review,
            created_at: row.created_at,
        }
    }
}

/// Repository for recipe rating database operations.
pub struct RatingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepository<'a> {
    /// Create a new rating repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a rating for a recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the recipe does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        rating: i32,
        review: Option<&str>,
    ) -> Result<Rating, RepositoryError> {
        let row = sqlx::query_as::<_, RatingRow>(
            r"
            INSERT INTO ratings (recipe_id, user_id, rating, review)
            VALUES ($1, $2, $3, $4)
            RETURNING id, recipe_id, user_id, rating, review, created_at
            ",
        )
        .bind(recipe_id)
        .bind(user_id)
        .bind(rating)
        .bind(review)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Ratings for a recipe, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_recipe(
        &self,
        recipe_id: RecipeId,
    ) -> Result<Vec<Rating>, RepositoryError> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r"
            SELECT id, recipe_id, user_id, rating, review, created_at
            FROM ratings
            WHERE recipe_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(recipe_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
