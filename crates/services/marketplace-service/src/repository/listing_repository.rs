//! Listing repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base;
use super::entities::listing::{self, ActiveModel, Entity as ListingEntity};
use common::{AppError, AppResult};
use domain::{Listing, ListingChanges, NewListing};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Listing repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Listing>>;

    async fn create(&self, input: NewListing) -> AppResult<Listing>;

    async fn update(&self, id: i32, changes: ListingChanges) -> AppResult<Listing>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Listing>>;

    /// Listings owned by a user
    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Listing>>;

    /// Listings offering a skill
    async fn list_by_skill(&self, skill_id: i32) -> AppResult<Vec<Listing>>;
}

/// Concrete implementation of ListingRepository
pub struct ListingStore {
    db: DatabaseConnection,
}

impl ListingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, column: listing::Column, id: i32) -> AppResult<Vec<Listing>> {
        let models = ListingEntity::find()
            .filter(column.eq(id))
            .order_by_asc(listing::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Listing::from).collect())
    }
}

#[async_trait]
impl ListingRepository for ListingStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Listing>> {
        let result = base::find_by_id::<ListingEntity>(&self.db, id).await?;
        Ok(result.map(Listing::from))
    }

    async fn create(&self, input: NewListing) -> AppResult<Listing> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            skill_id: Set(input.skill_id),
            title: Set(input.title),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(
            listing_id = model.id,
            user_id = model.user_id,
            skill_id = model.skill_id,
            "Listing created"
        );
        Ok(Listing::from(model))
    }

    async fn update(&self, id: i32, changes: ListingChanges) -> AppResult<Listing> {
        let model = base::get_by_id::<ListingEntity>(&self.db, id).await?;
        if changes.skill_id.is_none() && changes.title.is_none() && changes.description.is_none() {
            return Ok(Listing::from(model));
        }

        let mut active: ActiveModel = model.into();
        if let Some(skill_id) = changes.skill_id {
            active.skill_id = Set(skill_id);
        }
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Listing::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        base::delete_by_id::<ListingEntity>(&self.db, id).await?;
        tracing::info!(listing_id = id, "Listing deleted");
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Listing>> {
        let models = ListingEntity::find()
            .order_by_asc(listing::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Listing::from).collect())
    }

    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Listing>> {
        self.list_where(listing::Column::UserId, user_id).await
    }

    async fn list_by_skill(&self, skill_id: i32) -> AppResult<Vec<Listing>> {
        self.list_where(listing::Column::SkillId, skill_id).await
    }
}
