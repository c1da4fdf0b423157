//! Recipe intelligence service client.
//!
//! The intelligence service wraps a text-generation model behind two JSON
//! endpoints: `/check-allergy` classifies an ingredient list against a
//! free-text allergy description, and `/generate-recipe` produces a structured
//! recipe from a prompt. Calls cross a network boundary with the usual latency
//! and failure profile, so every request carries a timeout, and allergy
//! verdicts are cached briefly (identical ingredient lists repeat heavily
//! across catalog scans).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::IntelligenceConfig;
use crate::services::safety::AllergyChecker;

/// Verdict cache capacity.
const VERDICT_CACHE_CAPACITY: u64 = 1000;

/// Verdict cache TTL.
const VERDICT_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Errors that can occur when calling the intelligence service.
#[derive(Debug, Error)]
pub enum IntelligenceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The call exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The service returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the service.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Failed to parse a response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Client-side configuration problem.
    #[error("config error: {0}")]
    Config(String),
}

/// Verdict for one recipe's ingredient list against an allergy description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllergyVerdict {
    /// Whether any ingredient conflicts with the declared allergies.
    #[serde(rename = "unsafe")]
    pub is_unsafe: bool,
    /// Human-readable explanation for an unsafe verdict.
    #[serde(default)]
    pub reason: String,
}

/// Request body for `/generate-recipe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    pub title: Option<String>,
    pub ingredients: Vec<String>,
    pub servings: Option<i32>,
    pub dietary_tags: Option<Vec<String>>,
}

/// A recipe produced by the intelligence service.
///
/// Not persisted; passed through to the client as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub id: String,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub servings: Option<i32>,
    pub calories: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub difficulty: Option<String>,
    pub rating: Option<f32>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Cache key for allergy verdicts.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct VerdictKey {
    allergies: String,
    ingredients: Vec<String>,
}

#[derive(Serialize)]
struct CheckAllergyRequest<'a> {
    allergies: &'a str,
    ingredients: &'a [String],
}

/// Client for the recipe intelligence service.
#[derive(Clone)]
pub struct IntelligenceClient {
    inner: Arc<IntelligenceClientInner>,
}

struct IntelligenceClientInner {
    client: reqwest::Client,
    base_url: String,
    verdicts: Cache<VerdictKey, AllergyVerdict>,
}

impl IntelligenceClient {
    /// Create a new intelligence service client.
    ///
    /// # Errors
    ///
    /// Returns `IntelligenceError::Config` if the service token cannot be used
    /// as a header value, or `IntelligenceError::Http` if the HTTP client
    /// fails to build.
    pub fn new(config: &IntelligenceConfig) -> Result<Self, IntelligenceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.service_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| IntelligenceError::Config(format!("invalid service token: {e}")))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let verdicts = Cache::builder()
            .max_capacity(VERDICT_CACHE_CAPACITY)
            .time_to_live(VERDICT_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(IntelligenceClientInner {
                client,
                base_url: config.base_url.clone(),
                verdicts,
            }),
        })
    }

    /// Classify an ingredient list against a free-text allergy description.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, times out, or the verdict cannot
    /// be parsed. Callers decide the fate of the recipe (the partitioner
    /// fails closed).
    #[instrument(skip(self, ingredients), fields(ingredients = ingredients.len()))]
    pub async fn check_allergy(
        &self,
        allergies: &str,
        ingredients: &[String],
    ) -> Result<AllergyVerdict, IntelligenceError> {
        let key = VerdictKey {
            allergies: allergies.to_string(),
            ingredients: ingredients.to_vec(),
        };

        if let Some(verdict) = self.inner.verdicts.get(&key).await {
            debug!("allergy verdict cache hit");
            return Ok(verdict);
        }

        let url = format!("{}/check-allergy", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .json(&CheckAllergyRequest {
                allergies,
                ingredients,
            })
            .send()
            .await
            .map_err(map_send_error)?;

        let verdict: AllergyVerdict = handle_response(response).await?;
        self.inner.verdicts.insert(key, verdict.clone()).await;
        Ok(verdict)
    }

    /// Generate a structured recipe from the given ingredients and hints.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, times out, or the response cannot
    /// be parsed.
    #[instrument(skip(self, request), fields(ingredients = request.ingredients.len()))]
    pub async fn generate_recipe(
        &self,
        request: &GenerateRecipeRequest,
    ) -> Result<GeneratedRecipe, IntelligenceError> {
        let url = format!("{}/generate-recipe", self.inner.base_url);
        let response = self
            .inner
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        handle_response(response).await
    }
}

impl AllergyChecker for IntelligenceClient {
    async fn check_allergy(
        &self,
        allergies: &str,
        ingredients: &[String],
    ) -> Result<AllergyVerdict, IntelligenceError> {
        Self::check_allergy(self, allergies, ingredients).await
    }
}

/// Distinguish timeouts from other transport failures.
fn map_send_error(e: reqwest::Error) -> IntelligenceError {
    if e.is_timeout() {
        IntelligenceError::Timeout
    } else {
        IntelligenceError::Http(e)
    }
}

/// Turn a response into a parsed body or a typed error.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, IntelligenceError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(IntelligenceError::RateLimited(retry_after));
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(IntelligenceError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await.map_err(map_send_error)?;
    serde_json::from_str(&body)
        .map_err(|e| IntelligenceError::Parse(format!("failed to parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intelligence_error_display() {
        let err = IntelligenceError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");

        let err = IntelligenceError::Api {
            status: 502,
            message: "upstream model unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - upstream model unavailable");
    }

    #[test]
    fn test_allergy_verdict_deserialization() {
        let verdict: AllergyVerdict =
            serde_json::from_str(r#"{"unsafe": true, "reason": "contains peanuts"}"#)
                .expect("deserialize");
        assert!(verdict.is_unsafe);
        assert_eq!(verdict.reason, "contains peanuts");

        // reason is optional, the flag is not
        let verdict: AllergyVerdict =
            serde_json::from_str(r#"{"unsafe": false}"#).expect("deserialize");
        assert!(!verdict.is_unsafe);
        assert_eq!(verdict.reason, "");

        let malformed = serde_json::from_str::<AllergyVerdict>(r#"{"reason": "no flag"}"#);
        assert!(malformed.is_err());
    }

    #[test]
    fn test_generate_request_roundtrip() {
        let request = GenerateRecipeRequest {
            title: Some("Veggie stir fry".to_string()),
            ingredients: vec!["broccoli".to_string(), "soy sauce".to_string()],
            servings: Some(2),
            dietary_tags: Some(vec!["vegan".to_string()]),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["dietaryTags"][0], "vegan");

        let back: GenerateRecipeRequest = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.ingredients.len(), 2);
    }
}
