//! User service - user accounts and the user side of every relationship.

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{
    validate_input, Listing, NewUser, Review, SkillProficiency, Transaction, User, UserChanges,
};

use crate::repository::Repositories;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user. Emails are unique across all users.
    async fn create_user(&self, input: NewUser) -> AppResult<User>;

    async fn get_user(&self, id: i32) -> AppResult<User>;

    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User>;

    /// Delete a user. Fails with `ConstraintViolation` while listings,
    /// transactions or reviews still reference the user; skill pairings
    /// are removed with the user.
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    async fn skills(&self, user_id: i32) -> AppResult<Vec<SkillProficiency>>;

    async fn listings(&self, user_id: i32) -> AppResult<Vec<Listing>>;

    /// Transactions the user requested
    async fn transactions(&self, user_id: i32) -> AppResult<Vec<Transaction>>;

    async fn reviews_given(&self, user_id: i32) -> AppResult<Vec<Review>>;

    async fn reviews_received(&self, user_id: i32) -> AppResult<Vec<Review>>;
}

/// Concrete implementation of UserService using repositories.
pub struct UserManager {
    repos: Repositories,
}

impl UserManager {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Reject an email already held by a user other than `owner`.
    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> AppResult<()> {
        match self.repos.users.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(AppError::constraint(format!("email {} is already registered", email)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: NewUser) -> AppResult<User> {
        validate_input(&input)?;
        // The unique index still catches a concurrent insert
        self.ensure_email_free(&input.email, None).await?;

        self.repos.users.create(input).await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repos.users.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repos.users.find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repos.users.list().await
    }

    async fn update_user(&self, id: i32, changes: UserChanges) -> AppResult<User> {
        validate_input(&changes)?;
        if let Some(email) = &changes.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        self.repos.users.update(id, changes).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repos.users.delete(id).await.inspect_err(|e| {
            if let AppError::ConstraintViolation(_) = e {
                tracing::warn!(user_id = id, "User still referenced, delete refused");
            }
        })
    }

    async fn skills(&self, user_id: i32) -> AppResult<Vec<SkillProficiency>> {
        self.get_user(user_id).await?;
        self.repos.skills.skills_of_user(user_id).await
    }

    async fn listings(&self, user_id: i32) -> AppResult<Vec<Listing>> {
        self.get_user(user_id).await?;
        self.repos.listings.list_by_owner(user_id).await
    }

    async fn transactions(&self, user_id: i32) -> AppResult<Vec<Transaction>> {
        self.get_user(user_id).await?;
        self.repos.transactions.list_by_requester(user_id).await
    }

    async fn reviews_given(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.get_user(user_id).await?;
        self.repos.reviews.list_by_reviewer(user_id).await
    }

    async fn reviews_received(&self, user_id: i32) -> AppResult<Vec<Review>> {
        self.get_user(user_id).await?;
        self.repos.reviews.list_by_reviewee(user_id).await
    }
}
