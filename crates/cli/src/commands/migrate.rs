//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! forkful-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `FORKFUL_DATABASE_URL` - `PostgreSQL` connection string for the gateway
//!   (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/gateway/migrations/` and are embedded into
//! the binary at compile time.

use secrecy::SecretString;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run gateway database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the connection
/// fails, or a migration cannot be applied.
pub async fn gateway() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("FORKFUL_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("FORKFUL_DATABASE_URL"))?;

    tracing::info!("Connecting to gateway database...");
    let pool = forkful_gateway::db::create_pool(&database_url).await?;

    tracing::info!("Running gateway migrations...");
    sqlx::migrate!("../gateway/migrations").run(&pool).await?;

    tracing::info!("Gateway migrations complete!");
    Ok(())
}
