//! Migration: Create transactions table.

use domain::{STATUS_MAX_LENGTH, STATUS_PENDING, VALID_STATUSES};
use sea_orm_migration::prelude::*;

use super::{Listings, Transactions, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::ListingId).integer().not_null())
                    .col(ColumnDef::new(Transactions::RequesterId).integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string_len(STATUS_MAX_LENGTH)
                            .not_null()
                            .default(STATUS_PENDING)
                            .check(Expr::col(Transactions::Status).is_in(VALID_STATUSES.iter().copied())),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Transactions::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_listing_id")
                            .from(Transactions::Table, Transactions::ListingId)
                            .to(Listings::Table, Listings::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_requester_id")
                            .from(Transactions::Table, Transactions::RequesterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_listing_id")
                    .table(Transactions::Table)
                    .col(Transactions::ListingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_requester_id")
                    .table(Transactions::Table)
                    .col(Transactions::RequesterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}
