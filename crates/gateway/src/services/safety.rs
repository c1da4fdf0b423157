//! Recipe safety partitioning.
//!
//! Splits a recipe list into safe and unsafe buckets against a user's declared
//! allergies. Each recipe needs one classification call; the calls fan out
//! with bounded concurrency and the buckets keep the input order. A failed or
//! malformed verdict routes the recipe to the unsafe bucket ("fail closed") so
//! the result is always complete - no recipe is dropped or silently admitted.

use futures::{StreamExt, stream};
use serde::Serialize;
use tracing::instrument;

use crate::models::{CandidateRecipe, RecipeSummary};
use crate::services::intelligence::{AllergyVerdict, IntelligenceError};

/// Reason attached to recipes whose classification call failed.
pub const UNVERIFIED_REASON: &str = "could not verify";

/// The allergy classification seam.
///
/// Implemented by [`crate::services::IntelligenceClient`]; tests substitute
/// scripted checkers.
pub trait AllergyChecker {
    /// Classify an ingredient list against a free-text allergy description.
    fn check_allergy(
        &self,
        allergies: &str,
        ingredients: &[String],
    ) -> impl Future<Output = Result<AllergyVerdict, IntelligenceError>> + Send;
}

/// A recipe flagged as conflicting with the user's allergies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsafeRecipe {
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    pub unsafe_reason: String,
}

/// The two-way split of a recipe list.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionedRecipes {
    pub safe: Vec<RecipeSummary>,
    #[serde(rename = "unsafe")]
    pub unsafe_recipes: Vec<UnsafeRecipe>,
}

/// Partition recipes into safe and unsafe buckets.
///
/// A blank allergy description short-circuits: every recipe is safe and no
/// classification call is made. Otherwise at most `concurrency` checks are in
/// flight at once, and both buckets preserve the input order regardless of
/// which calls finish first.
///
/// This function is infallible: per-recipe failures become unsafe verdicts
/// with [`UNVERIFIED_REASON`].
#[instrument(skip(checker, recipes), fields(recipes = recipes.len()))]
pub async fn partition_recipes<C: AllergyChecker + Sync>(
    checker: &C,
    allergies: &str,
    recipes: Vec<CandidateRecipe>,
    concurrency: usize,
) -> PartitionedRecipes {
    let allergies = allergies.trim();
    if allergies.is_empty() {
        return PartitionedRecipes {
            safe: recipes.into_iter().map(|c| c.summary).collect(),
            unsafe_recipes: Vec::new(),
        };
    }

    // `buffered` yields in input order, which is what restores bucket order
    // after the concurrent fan-out.
    let verdicts: Vec<(RecipeSummary, AllergyVerdict)> =
        stream::iter(recipes.into_iter().map(|candidate| async move {
            let verdict = match checker.check_allergy(allergies, &candidate.ingredients).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    tracing::warn!(
                        recipe_id = %candidate.summary.id,
                        error = %e,
                        "allergy check failed, failing closed"
                    );
                    AllergyVerdict {
                        is_unsafe: true,
                        reason: UNVERIFIED_REASON.to_string(),
                    }
                }
            };
            (candidate.summary, verdict)
        }))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut safe = Vec::new();
    let mut unsafe_recipes = Vec::new();
    for (recipe, verdict) in verdicts {
        if verdict.is_unsafe {
            unsafe_recipes.push(UnsafeRecipe {
                recipe,
                unsafe_reason: verdict.reason,
            });
        } else {
            safe.push(recipe);
        }
    }

    PartitionedRecipes {
        safe,
        unsafe_recipes,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use forkful_core::RecipeId;
    use uuid::Uuid;

    use super::*;

    fn candidate(title: &str, ingredients: &[&str]) -> CandidateRecipe {
        CandidateRecipe {
            summary: RecipeSummary {
                id: RecipeId::new(Uuid::new_v4()),
                title: title.to_string(),
                image_url: None,
                cook_time_minutes: None,
                difficulty: None,
                rating: None,
                calories: None,
                tags: Vec::new(),
            },
            ingredients: ingredients.iter().map(ToString::to_string).collect(),
        }
    }

    /// Flags any recipe containing an ingredient that mentions the allergy
    /// text, and counts calls.
    struct KeywordChecker {
        calls: AtomicUsize,
    }

    impl KeywordChecker {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl AllergyChecker for KeywordChecker {
        async fn check_allergy(
            &self,
            allergies: &str,
            ingredients: &[String],
        ) -> Result<AllergyVerdict, IntelligenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let hit = ingredients.iter().find(|i| i.contains(allergies));
            Ok(match hit {
                Some(i) => AllergyVerdict {
                    is_unsafe: true,
                    reason: format!("contains {i}"),
                },
                None => AllergyVerdict {
                    is_unsafe: false,
                    reason: String::new(),
                },
            })
        }
    }

    /// Fails every check with a transport error.
    struct FailingChecker;

    impl AllergyChecker for FailingChecker {
        async fn check_allergy(
            &self,
            _allergies: &str,
            _ingredients: &[String],
        ) -> Result<AllergyVerdict, IntelligenceError> {
            Err(IntelligenceError::Timeout)
        }
    }

    /// Sleeps per call while tracking how many checks run at once.
    struct GaugedChecker {
        current: AtomicUsize,
        max_seen: AtomicUsize,
    }

    impl GaugedChecker {
        fn new() -> Self {
            Self {
                current: AtomicUsize::new(0),
                max_seen: AtomicUsize::new(0),
            }
        }
    }

    impl AllergyChecker for GaugedChecker {
        async fn check_allergy(
            &self,
            _allergies: &str,
            _ingredients: &[String],
        ) -> Result<AllergyVerdict, IntelligenceError> {
            let in_flight = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(in_flight, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(AllergyVerdict {
                is_unsafe: false,
                reason: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_blank_allergies_skips_classification() {
        let checker = KeywordChecker::new();
        let recipes = vec![candidate("Toast", &["bread"]), candidate("Soup", &["leek"])];

        let result = partition_recipes(&checker, "  ", recipes, 4).await;

        assert_eq!(result.safe.len(), 2);
        assert!(result.unsafe_recipes.is_empty());
        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_partition_flags_conflicting_recipe_only() {
        let checker = KeywordChecker::new();
        let recipes = vec![
            candidate("Toast", &["bread", "butter"]),
            candidate("PB Sandwich", &["peanut butter", "bread"]),
            candidate("Soup", &["leek", "potato"]),
        ];

        let result = partition_recipes(&checker, "peanut", recipes, 4).await;

        assert_eq!(checker.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            result.safe.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["Toast", "Soup"]
        );
        assert_eq!(result.unsafe_recipes.len(), 1);
        assert_eq!(result.unsafe_recipes[0].recipe.title, "PB Sandwich");
        assert_eq!(result.unsafe_recipes[0].unsafe_reason, "contains peanut butter");
    }

    #[tokio::test]
    async fn test_failed_check_fails_closed() {
        let recipes = vec![candidate("Toast", &["bread"]), candidate("Soup", &["leek"])];

        let result = partition_recipes(&FailingChecker, "peanuts", recipes, 4).await;

        assert!(result.safe.is_empty());
        assert_eq!(result.unsafe_recipes.len(), 2);
        for flagged in &result.unsafe_recipes {
            assert_eq!(flagged.unsafe_reason, UNVERIFIED_REASON);
        }
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded_and_order_preserved() {
        let checker = GaugedChecker::new();
        let titles = ["a", "b", "c", "d", "e", "f"];
        let recipes = titles
            .iter()
            .map(|t| candidate(t, &["flour"]))
            .collect::<Vec<_>>();

        let result = partition_recipes(&checker, "shellfish", recipes, 2).await;

        assert!(checker.max_seen.load(Ordering::SeqCst) <= 2);
        assert_eq!(
            result.safe.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            titles
        );
    }

    #[tokio::test]
    async fn test_zero_concurrency_is_clamped() {
        let checker = KeywordChecker::new();
        let recipes = vec![candidate("Toast", &["bread"])];

        let result = partition_recipes(&checker, "peanut", recipes, 0).await;
        assert_eq!(result.safe.len(), 1);
    }

    #[test]
    fn test_partition_serialization_shape() {
        let partitioned = PartitionedRecipes {
            safe: vec![],
            unsafe_recipes: vec![UnsafeRecipe {
                recipe: RecipeSummary {
                    id: RecipeId::new(Uuid::nil()),
                    title: "PB Sandwich".to_string(),
                    image_url: None,
                    cook_time_minutes: None,
                    difficulty: None,
                    rating: None,
                    calories: None,
                    tags: Vec::new(),
                },
                unsafe_reason: "contains peanut butter".to_string(),
            }],
        };

        let json = serde_json::to_value(&partitioned).expect("serialize");
        assert!(json["safe"].as_array().expect("safe array").is_empty());
        assert_eq!(json["unsafe"][0]["title"], "PB Sandwich");
        assert_eq!(json["unsafe"][0]["unsafeReason"], "contains peanut butter");
    }
}
