//! Migration: Create the attributed user/skill association table.
//!
//! Rows cascade away with either side; the pairing has no meaning alone.

use domain::PROFICIENCY_LEVEL_MAX_LENGTH;
use sea_orm_migration::prelude::*;

use super::{Skills, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserSkills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserSkills::UserId).integer().not_null())
                    .col(ColumnDef::new(UserSkills::SkillId).integer().not_null())
                    .col(
                        ColumnDef::new(UserSkills::ProficiencyLevel)
                            .string_len(PROFICIENCY_LEVEL_MAX_LENGTH)
                            .null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_user_skills")
                            .col(UserSkills::UserId)
                            .col(UserSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_user_id")
                            .from(UserSkills::Table, UserSkills::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skills_skill_id")
                            .from(UserSkills::Table, UserSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // The primary key already serves lookups by user
        manager
            .create_index(
                Index::create()
                    .name("idx_user_skills_skill_id")
                    .table(UserSkills::Table)
                    .col(UserSkills::SkillId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSkills::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserSkills {
    Table,
    UserId,
    SkillId,
    ProficiencyLevel,
}
