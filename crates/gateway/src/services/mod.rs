//! Service clients and domain services.
//!
//! - [`intelligence`] - HTTP client for the recipe intelligence service
//!   (allergy classification, recipe generation)
//! - [`safety`] - Recipe safety partitioning on top of the allergy checks

pub mod intelligence;
pub mod safety;

pub use intelligence::{
    AllergyVerdict, GenerateRecipeRequest, GeneratedRecipe, IntelligenceClient, IntelligenceError,
};
pub use safety::{AllergyChecker, PartitionedRecipes, UnsafeRecipe, partition_recipes};
