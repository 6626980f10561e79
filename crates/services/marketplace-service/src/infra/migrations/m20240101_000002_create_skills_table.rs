//! Migration: Create skills table.

use domain::{SKILL_DESCRIPTION_MAX_LENGTH, SKILL_NAME_MAX_LENGTH};
use sea_orm_migration::prelude::*;

use super::Skills;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Skills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Skills::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Skills::Name)
                            .string_len(SKILL_NAME_MAX_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Skills::Description)
                            .string_len(SKILL_DESCRIPTION_MAX_LENGTH)
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Skills::Table).to_owned())
            .await
    }
}
