//! Listing domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user's offer of one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i32,
    /// Owner
    pub user_id: i32,
    pub skill_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Listing creation input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewListing {
    pub user_id: i32,
    pub skill_id: i32,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Partial listing update. The owner cannot change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListingChanges {
    pub skill_id: Option<i32>,

    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<Option<String>>,
}
