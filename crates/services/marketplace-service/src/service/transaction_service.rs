//! Transaction service - requests against listings and their lifecycle.

use async_trait::async_trait;
use chrono::Utc;

use common::{AppError, AppResult, OptionExt};
use domain::{NewTransaction, Review, Transaction, TransactionStatus};

use crate::repository::Repositories;

#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Open a pending transaction. Owners cannot request their own listing.
    async fn request_transaction(&self, input: NewTransaction) -> AppResult<Transaction>;

    async fn get_transaction(&self, id: i32) -> AppResult<Transaction>;

    /// Mark a pending transaction completed and stamp `completed_at`.
    async fn complete_transaction(&self, id: i32) -> AppResult<Transaction>;

    async fn cancel_transaction(&self, id: i32) -> AppResult<Transaction>;

    /// Move to an arbitrary status; only pending -> completed/cancelled is legal.
    async fn update_status(&self, id: i32, status: TransactionStatus) -> AppResult<Transaction>;

    /// Delete a transaction. Refused while reviews reference it.
    async fn delete_transaction(&self, id: i32) -> AppResult<()>;

    async fn reviews(&self, transaction_id: i32) -> AppResult<Vec<Review>>;
}

pub struct TransactionManager {
    repos: Repositories,
}

impl TransactionManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    async fn transition(&self, id: i32, to: TransactionStatus) -> AppResult<Transaction> {
        let from = TransactionStatus::Pending;
        if !from.can_transition_to(to) {
            return Err(AppError::business_rule(format!(
                "transactions cannot move to {}",
                to
            )));
        }

        let completed_at = (to == TransactionStatus::Completed).then(Utc::now);
        let moved = self
            .repos
            .transactions
            .transition(id, from, to, completed_at)
            .await?;

        let current = self.get_transaction(id).await?;
        if !moved {
            tracing::warn!(
                transaction_id = id,
                status = %current.status,
                requested = %to,
                "Rejected transition out of a terminal status"
            );
            return Err(AppError::business_rule(format!(
                "transaction {} is already {}",
                id, current.status
            )));
        }

        Ok(current)
    }
}

#[async_trait]
impl TransactionService for TransactionManager {
    async fn request_transaction(&self, input: NewTransaction) -> AppResult<Transaction> {
        let listing = self
            .repos
            .listings
            .find_by_id(input.listing_id)
            .await?
            .ok_or_else(|| {
                AppError::constraint(format!("listing {} does not exist", input.listing_id))
            })?;

        if listing.user_id == input.requester_id {
            tracing::warn!(
                listing_id = listing.id,
                user_id = input.requester_id,
                "Owner requested own listing"
            );
            return Err(AppError::business_rule(
                "users cannot request their own listing",
            ));
        }

        self.repos.transactions.create(input).await
    }

    async fn get_transaction(&self, id: i32) -> AppResult<Transaction> {
        self.repos.transactions.find_by_id(id).await?.ok_or_not_found()
    }

    async fn complete_transaction(&self, id: i32) -> AppResult<Transaction> {
        self.transition(id, TransactionStatus::Completed).await
    }

    async fn cancel_transaction(&self, id: i32) -> AppResult<Transaction> {
        self.transition(id, TransactionStatus::Cancelled).await
    }

    async fn update_status(&self, id: i32, status: TransactionStatus) -> AppResult<Transaction> {
        self.transition(id, status).await
    }

    async fn delete_transaction(&self, id: i32) -> AppResult<()> {
        self.repos.transactions.delete(id).await
    }

    async fn reviews(&self, transaction_id: i32) -> AppResult<Vec<Review>> {
        self.get_transaction(transaction_id).await?;
        self.repos.reviews.list_by_transaction(transaction_id).await
    }
}
