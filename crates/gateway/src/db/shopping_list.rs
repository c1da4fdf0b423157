//! Shopping list repository.
//!
//! The merge invariant (at most one entry per user + canonical key) is held by
//! the `UNIQUE (user_id, ingredient_key)` constraint, and `upsert_item` leans
//! on it with a single conditional insert. Two concurrent submissions of the
//! same ingredient land on one row whose quantity is the sum of the deltas;
//! there is no read-then-write window.
//!
//! All mutating queries filter by `user_id`, so a caller can only ever touch
//! their own rows; a foreign entry id behaves exactly like a missing one.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use forkful_core::{IngredientKey, Quantity, ShoppingEntryId, UserId};

use super::RepositoryError;
use crate::models::ShoppingListEntry;

#[derive(sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    ingredient: String,
    ingredient_key: String,
    quantity: i32,
    checked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EntryRow> for ShoppingListEntry {
    fn from(row: EntryRow) -> Self {
        Self {
            id: ShoppingEntryId::new(row.id),
            user_id: UserId::new(row.user_id),
            ingredient: row.ingredient,
            // The stored key is already canonical; derivation is idempotent.
            ingredient_key: IngredientKey::derive(&row.ingredient_key),
            quantity: Quantity::clamped(row.quantity),
            checked: row.checked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for shopping list database operations.
pub struct ShoppingListRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShoppingListRepository<'a> {
    /// Create a new shopping list repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an ingredient or increment the quantity of the entry it merges
    /// into, atomically.
    ///
    /// The raw text of the latest submission wins; the canonical key never
    /// changes on merge (equal keys are what triggered it).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_item(
        &self,
        user_id: UserId,
        raw_ingredient: &str,
        key: &IngredientKey,
        delta: Quantity,
    ) -> Result<ShoppingListEntry, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            INSERT INTO shopping_list_entries (user_id, ingredient, ingredient_key, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, ingredient_key)
            DO UPDATE SET quantity = shopping_list_entries.quantity + EXCLUDED.quantity,
                          ingredient = EXCLUDED.ingredient,
                          updated_at = now()
            RETURNING id, user_id, ingredient, ingredient_key, quantity, checked,
                      created_at, updated_at
            ",
        )
        .bind(user_id)
        .bind(raw_ingredient)
        .bind(key.as_str())
        .bind(delta.get())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List a user's entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ShoppingListEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            r"
            SELECT id, user_id, ingredient, ingredient_key, quantity, checked,
                   created_at, updated_at
            FROM shopping_list_entries
            WHERE user_id = $1
            ORDER BY created_at
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a signed quantity delta, clamped to a floor of 1.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry does not exist or is
    /// not owned by `user_id`.
    pub async fn update_quantity(
        &self,
        entry_id: ShoppingEntryId,
        user_id: UserId,
        delta: i32,
    ) -> Result<Quantity, RepositoryError> {
        let quantity: Option<(i32,)> = sqlx::query_as(
            r"
            UPDATE shopping_list_entries
            SET quantity = GREATEST(1, quantity + $3), updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING quantity
            ",
        )
        .bind(entry_id)
        .bind(user_id)
        .bind(delta)
        .fetch_optional(self.pool)
        .await?;

        quantity
            .map(|(q,)| Quantity::clamped(q))
            .ok_or(RepositoryError::NotFound)
    }

    /// Set the checked flag on an entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry does not exist or is
    /// not owned by `user_id`.
    pub async fn set_checked(
        &self,
        entry_id: ShoppingEntryId,
        user_id: UserId,
        checked: bool,
    ) -> Result<ShoppingListEntry, RepositoryError> {
        let row = sqlx::query_as::<_, EntryRow>(
            r"
            UPDATE shopping_list_entries
            SET checked = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, ingredient, ingredient_key, quantity, checked,
                      created_at, updated_at
            ",
        )
        .bind(entry_id)
        .bind(user_id)
        .bind(checked)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Delete an entry owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry does not exist or is
    /// not owned by `user_id`; a non-owner never deletes the row.
    pub async fn remove(
        &self,
        entry_id: ShoppingEntryId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shopping_list_entries
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(entry_id)
        .bind(user_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
