//! Migration: Create listings table.

use domain::{LISTING_DESCRIPTION_MAX_LENGTH, LISTING_TITLE_MAX_LENGTH};
use sea_orm_migration::prelude::*;

use super::{Listings, Skills, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::UserId).integer().not_null())
                    .col(ColumnDef::new(Listings::SkillId).integer().not_null())
                    .col(
                        ColumnDef::new(Listings::Title)
                            .string_len(LISTING_TITLE_MAX_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Listings::Description)
                            .string_len(LISTING_DESCRIPTION_MAX_LENGTH)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_user_id")
                            .from(Listings::Table, Listings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_skill_id")
                            .from(Listings::Table, Listings::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_user_id")
                    .table(Listings::Table)
                    .col(Listings::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_skill_id")
                    .table(Listings::Table)
                    .col(Listings::SkillId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}
