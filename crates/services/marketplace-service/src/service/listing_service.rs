//! Listing service.

use async_trait::async_trait;

use common::{AppResult, OptionExt};
use domain::{validate_input, Listing, ListingChanges, NewListing, Transaction};

use crate::repository::Repositories;

#[async_trait]
pub trait ListingService: Send + Sync {
    /// Create a listing. An unknown owner or skill is a `ConstraintViolation`.
    async fn create_listing(&self, input: NewListing) -> AppResult<Listing>;

    async fn get_listing(&self, id: i32) -> AppResult<Listing>;

    async fn list_listings(&self) -> AppResult<Vec<Listing>>;

    async fn update_listing(&self, id: i32, changes: ListingChanges) -> AppResult<Listing>;

    /// Delete a listing. Refused while transactions reference it.
    async fn delete_listing(&self, id: i32) -> AppResult<()>;

    async fn transactions(&self, listing_id: i32) -> AppResult<Vec<Transaction>>;
}

pub struct ListingManager {
    repos: Repositories,
}

impl ListingManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl ListingService for ListingManager {
    async fn create_listing(&self, input: NewListing) -> AppResult<Listing> {
        validate_input(&input)?;
        self.repos.listings.create(input).await
    }

    async fn get_listing(&self, id: i32) -> AppResult<Listing> {
        self.repos.listings.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_listings(&self) -> AppResult<Vec<Listing>> {
        self.repos.listings.list().await
    }

    async fn update_listing(&self, id: i32, changes: ListingChanges) -> AppResult<Listing> {
        validate_input(&changes)?;
        self.repos.listings.update(id, changes).await
    }

    async fn delete_listing(&self, id: i32) -> AppResult<()> {
        self.repos.listings.delete(id).await
    }

    async fn transactions(&self, listing_id: i32) -> AppResult<Vec<Transaction>> {
        self.get_listing(listing_id).await?;
        self.repos.transactions.list_by_listing(listing_id).await
    }
}
