//! Review repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base;
use super::entities::review::{self, ActiveModel, Entity as ReviewEntity};
use common::{AppError, AppResult};
use domain::{NewReview, Review, ReviewChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Review repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    async fn create(&self, input: NewReview) -> AppResult<Review>;

    async fn update(&self, id: i32, changes: ReviewChanges) -> AppResult<Review>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Reviews attached to a transaction
    async fn list_by_transaction(&self, transaction_id: i32) -> AppResult<Vec<Review>>;

    /// Reviews written by a user
    async fn list_by_reviewer(&self, user_id: i32) -> AppResult<Vec<Review>>;

    /// Reviews about a user
    async fn list_by_reviewee(&self, user_id: i32) -> AppResult<Vec<Review>>;
}

/// Concrete implementation of ReviewRepository
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, column: review::Column, id: i32) -> AppResult<Vec<Review>> {
        let models = ReviewEntity::find()
            .filter(column.eq(id))
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Review::from).collect())
    }
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let result = base::find_by_id::<ReviewEntity>(&self.db, id).await?;
        Ok(result.map(Review::from))
    }

    async fn create(&self, input: NewReview) -> AppResult<Review> {
        let active_model = ActiveModel {
            id: NotSet,
            transaction_id: Set(input.transaction_id),
            reviewer_id: Set(input.reviewer_id),
            reviewee_id: Set(input.reviewee_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(
            review_id = model.id,
            transaction_id = model.transaction_id,
            reviewer_id = model.reviewer_id,
            reviewee_id = model.reviewee_id,
            "Review created"
        );
        Ok(Review::from(model))
    }

    async fn update(&self, id: i32, changes: ReviewChanges) -> AppResult<Review> {
        let model = base::get_by_id::<ReviewEntity>(&self.db, id).await?;
        if changes.rating.is_none() && changes.comment.is_none() {
            return Ok(Review::from(model));
        }

        let mut active: ActiveModel = model.into();
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }
        if let Some(comment) = changes.comment {
            active.comment = Set(comment);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Review::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        base::delete_by_id::<ReviewEntity>(&self.db, id).await?;
        tracing::info!(review_id = id, "Review deleted");
        Ok(())
    }

    async fn list_by_transaction(&self, transaction_id: i32) -> AppResult<Vec<Review>> {
        self.list_where(review::Column::TransactionId, transaction_id).await
    }

    async fn list_by_reviewer(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.list_where(review::Column::ReviewerId, user_id).await
    }

    async fn list_by_reviewee(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.list_where(review::Column::RevieweeId, user_id).await
    }
}
