//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//!
//! Tables are created in dependency order so every foreign key points at
//! an existing table; rollback drops them in reverse.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_skills_table;
mod m20240101_000003_create_user_skills_table;
mod m20240101_000004_create_listings_table;
mod m20240101_000005_create_transactions_table;
mod m20240101_000006_create_reviews_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_skills_table::Migration),
            Box::new(m20240101_000003_create_user_skills_table::Migration),
            Box::new(m20240101_000004_create_listings_table::Migration),
            Box::new(m20240101_000005_create_transactions_table::Migration),
            Box::new(m20240101_000006_create_reviews_table::Migration),
        ]
    }
}

// Identifiers shared by several migrations.

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Rating,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Skills {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
pub(crate) enum Listings {
    Table,
    Id,
    UserId,
    SkillId,
    Title,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Transactions {
    Table,
    Id,
    ListingId,
    RequesterId,
    Status,
    CreatedAt,
    CompletedAt,
}
