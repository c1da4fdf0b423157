//! Database operations for the gateway's `PostgreSQL` store.
//!
//! # Tables
//!
//! - `recipes`, `ingredients`, `steps`, `tags`, `recipe_tags` - The recipe
//!   catalog (read-only for the gateway)
//! - `profiles` - Display name, allergies, dietary preferences per user
//! - `shopping_list_entries` - Merged shopping list (unique per user + key)
//! - `favorites` - Saved recipes per user
//! - `ratings` - Star ratings and reviews
//!
//! Queries are runtime-checked (`query`/`query_as` with `FromRow` rows) so the
//! workspace builds without a live database; each repository converts its row
//! types into the domain models in `crate::models`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/gateway/migrations/` and run via:
//! ```bash
//! cargo run -p forkful-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod favorites;
pub mod profiles;
pub mod ratings;
pub mod recipes;
pub mod shopping_list;

pub use favorites::FavoriteRepository;
pub use profiles::ProfileRepository;
pub use ratings::RatingRepository;
pub use recipes::RecipeRepository;
pub use shopping_list::ShoppingListRepository;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found (or is not owned by the caller).
    #[error("not found")]
    NotFound,

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
