//! Integration tests for the shopping list merge flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The gateway running (cargo run -p forkful-gateway)
//!
//! Run with: cargo test -p forkful-integration-tests -- --ignored

use forkful_integration_tests::{client_for, gateway_base_url};
use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn add_items(client: &reqwest::Client, items: &[&str]) -> Vec<Value> {
    let resp = client
        .post(format!("{}/shopping-list", gateway_base_url()))
        .json(&json!({ "items": items }))
        .send()
        .await
        .expect("Failed to submit items");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse entries")
}

async fn list_entries(client: &reqwest::Client) -> Vec<Value> {
    let resp = client
        .get(format!("{}/shopping-list", gateway_base_url()))
        .send()
        .await
        .expect("Failed to list entries");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse entries")
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_resubmitted_ingredient_merges_into_one_entry() {
    let client = client_for(Uuid::new_v4());

    add_items(&client, &["2 tomatoes"]).await;
    add_items(&client, &["3 Tomatoes, diced"]).await;

    let entries = list_entries(&client).await;
    let tomatoes: Vec<&Value> = entries
        .iter()
        .filter(|e| e["ingredientKey"] == "tomatoes")
        .collect();

    assert_eq!(tomatoes.len(), 1, "expected a single merged entry");
    assert_eq!(tomatoes[0]["quantity"], 2);
    // Raw text reflects the latest submission
    assert_eq!(tomatoes[0]["ingredient"], "3 Tomatoes, diced");
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_quantity_delta_clamps_at_one() {
    let client = client_for(Uuid::new_v4());

    let entries = add_items(&client, &["1 lemon"]).await;
    let id = entries[0]["id"].as_str().expect("entry id").to_string();

    let resp = client
        .patch(format!("{}/shopping-list/{id}", gateway_base_url()))
        .json(&json!({ "delta": -10 }))
        .send()
        .await
        .expect("Failed to update quantity");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["quantity"], 1);
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_delete_requires_ownership() {
    let owner = client_for(Uuid::new_v4());
    let intruder = client_for(Uuid::new_v4());

    let entries = add_items(&owner, &["500g flour"]).await;
    let id = entries[0]["id"].as_str().expect("entry id").to_string();

    // A different user cannot delete the entry
    let resp = intruder
        .delete(format!("{}/shopping-list/{id}", gateway_base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The row is still there for its owner
    let entries = list_entries(&owner).await;
    assert!(entries.iter().any(|e| e["id"] == id.as_str()));

    // The owner can delete it
    let resp = owner
        .delete(format!("{}/shopping-list/{id}", gateway_base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_concurrent_submissions_never_duplicate() {
    let user = Uuid::new_v4();

    // Fire the same ingredient from two connections at once; the unique
    // constraint plus atomic increment must land on a single row.
    let client_a = client_for(user);
    let client_b = client_for(user);
    let (a, b) = tokio::join!(
        add_items(&client_a, &["2 cups sugar"]),
        add_items(&client_b, &["sugar"]),
    );
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);

    let entries = list_entries(&client_for(user)).await;
    let sugar: Vec<&serde_json::Value> = entries
        .iter()
        .filter(|e| e["ingredientKey"] == "sugar")
        .collect();

    assert_eq!(sugar.len(), 1);
    assert_eq!(sugar[0]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running gateway and database"]
async fn test_unauthenticated_requests_are_rejected() {
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/shopping-list", gateway_base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
