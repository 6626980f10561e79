//! Review domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Feedback left by one party of a transaction about the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: i32,
    pub transaction_id: i32,
    pub reviewer_id: i32,
    pub reviewee_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review creation input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    pub transaction_id: i32,
    pub reviewer_id: i32,
    pub reviewee_id: i32,
    pub rating: i32,

    #[validate(length(max = 300, message = "Comment must be at most 300 characters"))]
    pub comment: Option<String>,
}

/// Partial review update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewChanges {
    pub rating: Option<i32>,

    #[validate(length(max = 300, message = "Comment must be at most 300 characters"))]
    pub comment: Option<Option<String>>,
}
