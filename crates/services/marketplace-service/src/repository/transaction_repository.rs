//! Transaction repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::base;
use super::entities::transaction::{self, ActiveModel, Entity as TransactionEntity, Status};
use common::{AppError, AppResult};
use domain::{NewTransaction, Transaction, TransactionStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Transaction repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Transaction>>;

    /// Insert a pending transaction
    async fn create(&self, input: NewTransaction) -> AppResult<Transaction>;

    /// Move a transaction from `from` to `to` in one conditional update.
    ///
    /// Returns `false` when no row with that ID is currently in `from`;
    /// the row is left untouched in that case.
    async fn transition(
        &self,
        id: i32,
        from: TransactionStatus,
        to: TransactionStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<bool>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Transactions against a listing
    async fn list_by_listing(&self, listing_id: i32) -> AppResult<Vec<Transaction>>;

    /// Transactions requested by a user
    async fn list_by_requester(&self, user_id: i32) -> AppResult<Vec<Transaction>>;
}

/// Concrete implementation of TransactionRepository
pub struct TransactionStore {
    db: DatabaseConnection,
}

impl TransactionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, column: transaction::Column, id: i32) -> AppResult<Vec<Transaction>> {
        let models = TransactionEntity::find()
            .filter(column.eq(id))
            .order_by_asc(transaction::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Transaction::from).collect())
    }
}

#[async_trait]
impl TransactionRepository for TransactionStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Transaction>> {
        let result = base::find_by_id::<TransactionEntity>(&self.db, id).await?;
        Ok(result.map(Transaction::from))
    }

    async fn create(&self, input: NewTransaction) -> AppResult<Transaction> {
        let active_model = ActiveModel {
            id: NotSet,
            listing_id: Set(input.listing_id),
            requester_id: Set(input.requester_id),
            status: Set(Status::Pending),
            created_at: Set(Utc::now()),
            completed_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(
            transaction_id = model.id,
            listing_id = model.listing_id,
            requester_id = model.requester_id,
            "Transaction requested"
        );
        Ok(Transaction::from(model))
    }

    async fn transition(
        &self,
        id: i32,
        from: TransactionStatus,
        to: TransactionStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<bool> {
        let result = TransactionEntity::update_many()
            .col_expr(transaction::Column::Status, Expr::value(Status::from(to)))
            .col_expr(transaction::Column::CompletedAt, Expr::value(completed_at))
            .filter(transaction::Column::Id.eq(id))
            .filter(transaction::Column::Status.eq(Status::from(from)))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        let applied = result.rows_affected == 1;
        if applied {
            tracing::info!(transaction_id = id, %from, %to, "Transaction status changed");
        }
        Ok(applied)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        base::delete_by_id::<TransactionEntity>(&self.db, id).await?;
        tracing::info!(transaction_id = id, "Transaction deleted");
        Ok(())
    }

    async fn list_by_listing(&self, listing_id: i32) -> AppResult<Vec<Transaction>> {
        self.list_where(transaction::Column::ListingId, listing_id).await
    }

    async fn list_by_requester(&self, user_id: i32) -> AppResult<Vec<Transaction>> {
        self.list_where(transaction::Column::RequesterId, user_id).await
    }
}
