//! Transaction database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{Transaction, TransactionStatus};

/// Stored form of [`TransactionStatus`]. The column also carries a CHECK
/// constraint so rows written outside this layer stay within the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<Status> for TransactionStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Pending => TransactionStatus::Pending,
            Status::Completed => TransactionStatus::Completed,
            Status::Cancelled => TransactionStatus::Cancelled,
        }
    }
}

impl From<TransactionStatus> for Status {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Pending => Status::Pending,
            TransactionStatus::Completed => Status::Completed,
            TransactionStatus::Cancelled => Status::Cancelled,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub listing_id: i32,
    pub requester_id: i32,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listing::Entity",
        from = "Column::ListingId",
        to = "super::listing::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Listing,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RequesterId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Requester,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requester.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transaction {
    fn from(model: Model) -> Self {
        Transaction {
            id: model.id,
            listing_id: model.listing_id,
            requester_id: model.requester_id,
            status: model.status.into(),
            created_at: model.created_at,
            completed_at: model.completed_at,
        }
    }
}
