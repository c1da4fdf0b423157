//! Integration tests for recipe search and the allergy-partitioned feed.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and a seeded
//!   recipe catalog
//! - The gateway running (cargo run -p forkful-gateway)
//! - The intelligence service reachable at `INTELLIGENCE_BASE_URL`
//!
//! Run with: cargo test -p forkful-integration-tests -- --ignored

use forkful_integration_tests::{client_for, gateway_base_url};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_search_is_public_and_respects_max_time() {
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/recipes/search?maxTime=30", gateway_base_url()))
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);

    let recipes: Vec<Value> = resp.json().await.expect("Failed to parse recipes");
    for recipe in &recipes {
        if let Some(minutes) = recipe["cookTimeMinutes"].as_i64() {
            assert!(minutes <= 30);
        }
    }
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_unknown_recipe_returns_not_found() {
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/recipes/{}", gateway_base_url(), Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to fetch recipe");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running gateway, database, and intelligence service"]
async fn test_recommended_with_no_allergies_marks_everything_safe() {
    let client = client_for(Uuid::new_v4());

    // A fresh user has no profile, so no allergy text and no classification.
    let resp = client
        .get(format!("{}/recipes/recommended", gateway_base_url()))
        .send()
        .await
        .expect("Failed to fetch recommendations");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["unsafe"].as_array().expect("unsafe bucket").is_empty());
}

#[tokio::test]
#[ignore = "Requires running gateway, database, and intelligence service"]
async fn test_recommended_flags_allergy_conflicts() {
    let user = Uuid::new_v4();
    let client = client_for(user);

    let resp = client
        .put(format!("{}/profile", gateway_base_url()))
        .json(&json!({ "allergies": "peanuts" }))
        .send()
        .await
        .expect("Failed to save profile");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/recipes/recommended", gateway_base_url()))
        .send()
        .await
        .expect("Failed to fetch recommendations");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    for flagged in body["unsafe"].as_array().expect("unsafe bucket") {
        assert!(
            flagged["unsafeReason"].as_str().is_some_and(|r| !r.is_empty()),
            "unsafe recipes carry a reason"
        );
    }
}
