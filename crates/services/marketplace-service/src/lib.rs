//! Marketplace Service Library
//!
//! Persistent schema for the skill marketplace: users, skills and the
//! proficiency each user holds in them, listings offering a skill,
//! transactions requesting a listing and reviews between the parties.
//! Storage goes through SeaORM; the migrator owns the schema.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use crate::config::MarketplaceConfig;
use crate::infra::Database;
use crate::service::Services;

/// Connect, apply pending migrations and wire every service.
pub async fn connect(config: &MarketplaceConfig) -> Result<(Database, Services), sea_orm::DbErr> {
    let db = Database::connect(&config.database).await?;
    let services = Services::from_connection(db.get_connection());
    Ok((db, services))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = MarketplaceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Check that the configured database answers.
pub async fn ping() -> Result<(), Box<dyn std::error::Error>> {
    let config = MarketplaceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database)
        .await
        .map_err(common::AppError::from)?;
    db.ping().await.map_err(common::AppError::from)?;
    info!("Database reachable");
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
