//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::GatewayConfig;
use crate::services::{IntelligenceClient, IntelligenceError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GatewayConfig,
    pool: PgPool,
    intelligence: IntelligenceClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Gateway configuration
    /// * `pool` - `PostgreSQL` connection pool
    ///
    /// # Errors
    ///
    /// Returns an error if the intelligence service client cannot be built.
    pub fn new(config: GatewayConfig, pool: PgPool) -> Result<Self, IntelligenceError> {
        let intelligence = IntelligenceClient::new(&config.intelligence)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                intelligence,
            }),
        })
    }

    /// Get a reference to the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the intelligence service client.
    #[must_use]
    pub fn intelligence(&self) -> &IntelligenceClient {
        &self.inner.intelligence
    }
}
