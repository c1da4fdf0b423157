//! User profile domain types.
//!
//! The profile carries the free-text allergy description that drives recipe
//! safety partitioning. Identity itself belongs to the external provider; a
//! profile row exists only once the user has saved one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forkful_core::UserId;

/// A user's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub display_name: Option<String>,
    /// Free-text allergy description, empty when none declared.
    pub allergies: String,
    pub dietary_preferences: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub allergies: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
}
