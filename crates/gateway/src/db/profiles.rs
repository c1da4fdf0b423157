//! Profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use forkful_core::UserId;

use super::RepositoryError;
use crate::models::{ProfileUpdate, UserProfile};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    display_name: Option<String>,
    allergies: String,
    dietary_preferences: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: UserId::new(row.id),
            display_name: row.display_name,
            allergies: row.allergies,
            dietary_preferences: row.dietary_preferences,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for user profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user's profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            SELECT id, display_name, allergies, dietary_preferences,
                   created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create or partially update a user's profile.
    ///
    /// Absent fields keep their stored values (or the column defaults on
    /// first save).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"
            INSERT INTO profiles (id, display_name, allergies, dietary_preferences)
            VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, '{}'))
            ON CONFLICT (id)
            DO UPDATE SET
                display_name = COALESCE($2, profiles.display_name),
                allergies = COALESCE($3, profiles.allergies),
                dietary_preferences = COALESCE($4, profiles.dietary_preferences),
                updated_at = now()
            RETURNING id, display_name, allergies, dietary_preferences,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(update.display_name)
        .bind(update.allergies)
        .bind(update.dietary_preferences)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// The user's declared allergies, empty when no profile exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn allergies_for(&self, user_id: UserId) -> Result<String, RepositoryError> {
        let row: Option<(String,)> = sqlx::query_as(
            r"
            SELECT allergies FROM profiles WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(a,)| a).unwrap_or_default())
    }
}
