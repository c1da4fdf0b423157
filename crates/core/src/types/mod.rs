//! Core types for Forkful.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod ingredient;
pub mod quantity;

pub use id::*;
pub use ingredient::{IngredientKey, normalize};
pub use quantity::Quantity;
