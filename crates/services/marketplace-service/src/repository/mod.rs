//! Repository layer for data access.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

mod base;
pub mod entities;
mod listing_repository;
mod review_repository;
mod skill_repository;
mod transaction_repository;
mod user_repository;

pub use listing_repository::{ListingRepository, ListingStore};
pub use review_repository::{ReviewRepository, ReviewStore};
pub use skill_repository::{SkillRepository, SkillStore};
pub use transaction_repository::{TransactionRepository, TransactionStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use listing_repository::MockListingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use review_repository::MockReviewRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use skill_repository::MockSkillRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use transaction_repository::MockTransactionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// One handle per repository, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// Build SeaORM-backed stores sharing one connection pool.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            skills: Arc::new(SkillStore::new(db.clone())),
            listings: Arc::new(ListingStore::new(db.clone())),
            transactions: Arc::new(TransactionStore::new(db.clone())),
            reviews: Arc::new(ReviewStore::new(db)),
        }
    }
}

/// Mock repositories to set expectations on before building [`Repositories`].
///
/// Any call on a mock without a matching expectation panics.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockRepositories {
    pub users: MockUserRepository,
    pub skills: MockSkillRepository,
    pub listings: MockListingRepository,
    pub transactions: MockTransactionRepository,
    pub reviews: MockReviewRepository,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Repositories {
        Repositories {
            users: Arc::new(self.users),
            skills: Arc::new(self.skills),
            listings: Arc::new(self.listings),
            transactions: Arc::new(self.transactions),
            reviews: Arc::new(self.reviews),
        }
    }
}
