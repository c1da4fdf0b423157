//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FORKFUL_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `INTELLIGENCE_BASE_URL` - Base URL of the recipe intelligence service
//!
//! ## Optional
//! - `FORKFUL_HOST` - Bind address (default: 127.0.0.1)
//! - `FORKFUL_PORT` - Listen port (default: 8000)
//! - `FORKFUL_ALLOWED_ORIGINS` - Comma-separated browser origins for CORS
//! - `INTELLIGENCE_SERVICE_TOKEN` - Bearer token for the intelligence service
//! - `INTELLIGENCE_TIMEOUT_SECS` - Per-call timeout (default: 10)
//! - `INTELLIGENCE_CHECK_CONCURRENCY` - Allergy-check fan-out cap (default: 4)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Gateway application configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Browser origins allowed by CORS (the front end is a separate SPA)
    pub allowed_origins: Vec<String>,
    /// Recipe intelligence service configuration
    pub intelligence: IntelligenceConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Recipe intelligence service configuration.
///
/// Implements `Debug` manually to redact the service token.
#[derive(Clone)]
pub struct IntelligenceConfig {
    /// Base URL of the service (e.g., <http://localhost:8001>)
    pub base_url: String,
    /// Bearer token sent with every request, if the deployment requires one
    pub service_token: Option<SecretString>,
    /// Timeout applied to each outbound call
    pub timeout: Duration,
    /// Maximum number of in-flight allergy checks per partition request
    pub check_concurrency: usize,
}

impl std::fmt::Debug for IntelligenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntelligenceConfig")
            .field("base_url", &self.base_url)
            .field(
                "service_token",
                &self.service_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .field("check_concurrency", &self.check_concurrency)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("FORKFUL_DATABASE_URL")?;
        let host = get_env_or_default("FORKFUL_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FORKFUL_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FORKFUL_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FORKFUL_PORT".to_string(), e.to_string()))?;
        let allowed_origins = get_optional_env("FORKFUL_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        let intelligence = IntelligenceConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            allowed_origins,
            intelligence,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl IntelligenceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = get_env_or_default("INTELLIGENCE_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("INTELLIGENCE_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let check_concurrency = get_env_or_default("INTELLIGENCE_CHECK_CONCURRENCY", "4")
            .parse::<usize>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "INTELLIGENCE_CHECK_CONCURRENCY".to_string(),
                    e.to_string(),
                )
            })?;
        if check_concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "INTELLIGENCE_CHECK_CONCURRENCY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url: get_required_env("INTELLIGENCE_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            service_token: get_optional_env("INTELLIGENCE_SERVICE_TOKEN").map(SecretString::from),
            timeout: Duration::from_secs(timeout_secs),
            check_concurrency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated origin list, dropping empty segments.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173, https://forkful.app ,"),
            vec![
                "http://localhost:5173".to_string(),
                "https://forkful.app".to_string()
            ]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = GatewayConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            allowed_origins: vec![],
            intelligence: IntelligenceConfig {
                base_url: "http://localhost:8001".to_string(),
                service_token: None,
                timeout: Duration::from_secs(10),
                check_concurrency: 4,
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_intelligence_config_debug_redacts_token() {
        let config = IntelligenceConfig {
            base_url: "http://localhost:8001".to_string(),
            service_token: Some(SecretString::from("super_secret_service_token")),
            timeout: Duration::from_secs(10),
            check_concurrency: 4,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("http://localhost:8001"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_service_token"));
    }
}
