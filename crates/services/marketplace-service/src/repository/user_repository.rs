//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::base;
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{NewUser, User, UserChanges, DEFAULT_USER_RATING};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user, stamping `created_at` and defaulting the rating
    async fn create(&self, input: NewUser) -> AppResult<User>;

    /// Apply the set fields of `changes`
    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Delete user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// List all users by ID
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = base::find_by_id::<UserEntity>(&self.db, id).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, input: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(input.username),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            rating: Set(input.rating.unwrap_or(DEFAULT_USER_RATING)),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(user_id = model.id, "User created");
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        let model = base::get_by_id::<UserEntity>(&self.db, id).await?;
        if changes.is_empty() {
            return Ok(User::from(model));
        }

        let mut active: ActiveModel = model.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        tracing::info!(user_id = id, "User updated");
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        base::delete_by_id::<UserEntity>(&self.db, id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
