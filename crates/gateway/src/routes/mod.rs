//! HTTP route handlers for the gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database)
//!
//! # Recipes
//! GET  /recipes/search            - Catalog search (q, diet, maxTime)
//! GET  /recipes/recommended       - Allergy-partitioned catalog (auth)
//! POST /recipes/generate          - AI recipe generation (auth)
//! GET  /recipes/{id}              - Recipe detail
//!
//! # Shopping list (auth)
//! GET    /shopping-list           - List entries
//! POST   /shopping-list           - Submit ingredient lines (merge)
//! PATCH  /shopping-list/{id}      - Apply quantity delta
//! PATCH  /shopping-list/{id}/checked - Set checked flag
//! DELETE /shopping-list/{id}      - Remove entry
//!
//! # Favorites (auth)
//! GET    /favorites               - List favorite recipe ids
//! POST   /favorites/{recipe_id}   - Add favorite
//! DELETE /favorites/{recipe_id}   - Remove favorite
//!
//! # Profile (auth)
//! GET  /profile                   - Fetch caller's profile
//! PUT  /profile                   - Create or update profile
//!
//! # Ratings (auth)
//! POST /ratings                   - Rate a recipe
//! GET  /ratings/{recipe_id}       - Ratings for a recipe
//! ```

pub mod favorites;
pub mod profile;
pub mod ratings;
pub mod recipes;
pub mod shopping_list;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::state::AppState;

/// Create the recipe routes router.
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(recipes::search))
        .route("/recommended", get(recipes::recommended))
        .route("/generate", post(recipes::generate))
        .route("/{id}", get(recipes::show))
}

/// Create the shopping list routes router.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shopping_list::list).post(shopping_list::add))
        .route(
            "/{id}",
            patch(shopping_list::update_quantity).delete(shopping_list::remove),
        )
        .route("/{id}/checked", patch(shopping_list::set_checked))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list))
        .route(
            "/{recipe_id}",
            post(favorites::add).delete(favorites::remove),
        )
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(profile::show).put(profile::update))
}

/// Create the ratings routes router.
pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(ratings::create))
        .route("/{recipe_id}", get(ratings::list_for_recipe))
}

/// Create all routes for the gateway.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/recipes", recipe_routes())
        .nest("/shopping-list", shopping_list_routes())
        .nest("/favorites", favorite_routes())
        .nest("/profile", profile_routes())
        .nest("/ratings", rating_routes())
}
