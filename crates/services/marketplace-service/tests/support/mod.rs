//! Shared setup for the database-backed tests.

#![allow(dead_code)]

use common::DatabaseConfig;
use domain::{Listing, NewListing, NewSkill, NewUser, Skill, User};
use marketplace_service_lib::infra::Database;
use marketplace_service_lib::service::{ServiceContainer, Services};

/// One private in-memory database per test; a single pooled connection
/// keeps every statement on the same database.
pub fn memory_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    }
}

pub async fn setup() -> (Database, Services) {
    let db = Database::connect(&memory_config())
        .await
        .expect("in-memory database should open");
    let services = Services::from_connection(db.get_connection());
    (db, services)
}

pub async fn create_user(services: &Services, name: &str) -> User {
    services
        .users()
        .create_user(NewUser::new(name, format!("{}@example.com", name), "hashed"))
        .await
        .expect("user should be created")
}

pub async fn create_skill(services: &Services, name: &str) -> Skill {
    services
        .skills()
        .create_skill(NewSkill::named(name))
        .await
        .expect("skill should be created")
}

pub async fn create_listing(services: &Services, owner: &User, skill: &Skill, title: &str) -> Listing {
    services
        .listings()
        .create_listing(NewListing {
            user_id: owner.id,
            skill_id: skill.id,
            title: title.to_string(),
            description: None,
        })
        .await
        .expect("listing should be created")
}
