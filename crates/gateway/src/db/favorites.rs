//! Favorites repository.

use sqlx::PgPool;
use uuid::Uuid;

use forkful_core::{RecipeId, UserId};

use super::RepositoryError;

/// Repository for favorite-recipe database operations.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Recipe ids the user has favorited, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<RecipeId>, RepositoryError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r"
            SELECT recipe_id
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| RecipeId::new(id)).collect())
    }

    /// Mark a recipe as a favorite. Favoriting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the recipe does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, user_id: UserId, recipe_id: RecipeId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO favorites (user_id, recipe_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, recipe_id) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Remove a recipe from the user's favorites. Removing a recipe that was
    /// never favorited is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM favorites
            WHERE user_id = $1 AND recipe_id = $2
            ",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
