//! Review service.

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{validate_input, NewReview, Review, ReviewChanges};

use crate::repository::Repositories;

#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Record a review between the two parties of a transaction.
    ///
    /// Reviewer and reviewee must differ, and each must be either the
    /// requester or the owner of the reviewed listing.
    async fn create_review(&self, input: NewReview) -> AppResult<Review>;

    async fn get_review(&self, id: i32) -> AppResult<Review>;

    async fn update_review(&self, id: i32, changes: ReviewChanges) -> AppResult<Review>;

    async fn delete_review(&self, id: i32) -> AppResult<()>;
}

pub struct ReviewManager {
    repos: Repositories,
}

impl ReviewManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn check_parties(&self, input: &NewReview) -> AppResult<()> {
        if input.reviewer_id == input.reviewee_id {
            tracing::warn!(user_id = input.reviewer_id, "Self-review rejected");
            return Err(AppError::business_rule("users cannot review themselves"));
        }

        let transaction = self
            .repos
            .transactions
            .find_by_id(input.transaction_id)
            .await?
            .ok_or_else(|| {
                AppError::constraint(format!(
                    "transaction {} does not exist",
                    input.transaction_id
                ))
            })?;
        let listing = self
            .repos
            .listings
            .find_by_id(transaction.listing_id)
            .await?
            .ok_or_else(|| AppError::internal("transaction references a missing listing"))?;

        let parties = [transaction.requester_id, listing.user_id];
        if !parties.contains(&input.reviewer_id) || !parties.contains(&input.reviewee_id) {
            tracing::warn!(
                transaction_id = transaction.id,
                reviewer_id = input.reviewer_id,
                reviewee_id = input.reviewee_id,
                "Review between non-parties rejected"
            );
            return Err(AppError::business_rule(
                "only the requester and the listing owner can review each other",
            ));
        }

        Ok(())
    }
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn create_review(&self, input: NewReview) -> AppResult<Review> {
        validate_input(&input)?;
        self.check_parties(&input).await?;
        self.repos.reviews.create(input).await
    }

    async fn get_review(&self, id: i32) -> AppResult<Review> {
        self.repos.reviews.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_review(&self, id: i32, changes: ReviewChanges) -> AppResult<Review> {
        validate_input(&changes)?;
        self.repos.reviews.update(id, changes).await
    }

    async fn delete_review(&self, id: i32) -> AppResult<()> {
        self.repos.reviews.delete(id).await
    }
}
