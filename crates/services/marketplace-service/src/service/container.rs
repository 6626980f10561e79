//! Service container - one place to reach every marketplace service.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    ListingManager, ListingService, ReviewManager, ReviewService, SkillManager, SkillService,
    TransactionManager, TransactionService, UserManager, UserService,
};
use crate::repository::Repositories;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;

    fn skills(&self) -> Arc<dyn SkillService>;

    fn listings(&self) -> Arc<dyn ListingService>;

    fn transactions(&self) -> Arc<dyn TransactionService>;

    fn reviews(&self) -> Arc<dyn ReviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    skill_service: Arc<dyn SkillService>,
    listing_service: Arc<dyn ListingService>,
    transaction_service: Arc<dyn TransactionService>,
    review_service: Arc<dyn ReviewService>,
}

impl Services {
    /// Wire every service over the same repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            user_service: Arc::new(UserManager::new(repos.clone())),
            skill_service: Arc::new(SkillManager::new(repos.clone())),
            listing_service: Arc::new(ListingManager::new(repos.clone())),
            transaction_service: Arc::new(TransactionManager::new(repos.clone())),
            review_service: Arc::new(ReviewManager::new(repos)),
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self::new(Repositories::from_connection(db))
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn skills(&self) -> Arc<dyn SkillService> {
        self.skill_service.clone()
    }

    fn listings(&self) -> Arc<dyn ListingService> {
        self.listing_service.clone()
    }

    fn transactions(&self) -> Arc<dyn TransactionService> {
        self.transaction_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRepositories;
    use common::AppError;

    #[tokio::test]
    async fn test_services_share_repositories() {
        let mut mocks = MockRepositories::new();
        mocks.listings.expect_find_by_id().times(2).returning(|_| Ok(None));

        let services = Services::new(mocks.build());

        assert!(matches!(
            services.listings().get_listing(1).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            services.listings().transactions(1).await,
            Err(AppError::NotFound)
        ));
    }
}
