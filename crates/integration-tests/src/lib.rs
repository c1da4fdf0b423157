//! Integration tests for Forkful.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, then apply migrations
//! cargo run -p forkful-cli -- migrate
//!
//! # Start the gateway
//! cargo run -p forkful-gateway
//!
//! # Run integration tests
//! cargo test -p forkful-integration-tests -- --ignored
//! ```
//!
//! The gateway trusts the subject claim of the identity provider's bearer
//! token (verification happens at the provider's edge), so tests mint their
//! own tokens for throwaway user ids.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

/// Base URL for the gateway API (configurable via environment).
#[must_use]
pub fn gateway_base_url() -> String {
    std::env::var("GATEWAY_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Mint a bearer token for a test user.
#[must_use]
pub fn bearer_token(user_id: Uuid) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": user_id.to_string(), "role": "authenticated" })
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{payload}.test-signature")
}

/// Create an HTTP client that authenticates as the given test user.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client_for(user_id: Uuid) -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", bearer_token(user_id)))
        .expect("header value");
    headers.insert(reqwest::header::AUTHORIZATION, value);

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .expect("Failed to create HTTP client")
}
