//! User persistence tests against SQLite.

mod support;

use chrono::{Duration, Utc};

use common::AppError;
use domain::{NewUser, UserChanges};
use marketplace_service_lib::repository::Repositories;
use marketplace_service_lib::service::ServiceContainer;

use support::{create_listing, create_skill, create_user, setup};

#[tokio::test]
async fn test_user_round_trip() {
    let (_db, services) = setup().await;

    let created = services
        .users()
        .create_user(NewUser::new("alice", "a@x.com", "h"))
        .await
        .unwrap();
    let fetched = services.users().get_user(created.id).await.unwrap();

    assert!(fetched.id > 0);
    assert_eq!(fetched.username, "alice");
    assert_eq!(fetched.email, "a@x.com");
    assert_eq!(fetched.password_hash, "h");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_user_defaults() {
    let (_db, services) = setup().await;

    let before = Utc::now() - Duration::seconds(1);
    let user = create_user(&services, "bob").await;
    let after = Utc::now() + Duration::seconds(1);

    assert_eq!(user.rating, 0.0);
    assert!(user.created_at >= before && user.created_at <= after);
}

#[tokio::test]
async fn test_unique_emails_all_succeed() {
    let (_db, services) = setup().await;

    for name in ["ann", "ben", "cat", "dan"] {
        create_user(&services, name).await;
    }

    assert_eq!(services.users().list_users().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_duplicate_email_is_constraint_violation() {
    let (_db, services) = setup().await;
    create_user(&services, "alice").await;

    let result = services
        .users()
        .create_user(NewUser::new("other", "alice@example.com", "h"))
        .await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_duplicate_email_rejected_by_unique_index() {
    let (db, services) = setup().await;
    create_user(&services, "alice").await;

    // Straight to the store, past the service pre-check
    let repos = Repositories::from_connection(db.get_connection());
    let result = repos
        .users
        .create(NewUser::new("other", "alice@example.com", "h"))
        .await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let (_db, services) = setup().await;
    let users = services.users();

    assert!(matches!(users.get_user(404).await, Err(AppError::NotFound)));
    assert!(matches!(
        users
            .update_user(
                404,
                UserChanges {
                    rating: Some(4.5),
                    ..Default::default()
                }
            )
            .await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(users.delete_user(404).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_user_fields() {
    let (_db, services) = setup().await;
    let user = create_user(&services, "carol").await;

    let updated = services
        .users()
        .update_user(
            user.id,
            UserChanges {
                username: Some("caroline".to_string()),
                rating: Some(4.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "caroline");
    assert_eq!(updated.rating, 4.5);
    assert_eq!(updated.email, user.email);
}

#[tokio::test]
async fn test_delete_user_with_listing_is_restricted() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let skill = create_skill(&services, "Plumbing").await;
    let listing = create_listing(&services, &owner, &skill, "Fix a tap").await;

    let result = services.users().delete_user(owner.id).await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    assert!(services.users().get_user(owner.id).await.is_ok());
    assert!(services.listings().get_listing(listing.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_user_removes_skill_pairings() {
    let (_db, services) = setup().await;
    let user = create_user(&services, "dora").await;
    let skill = create_skill(&services, "Welding").await;
    services
        .skills()
        .add_user_skill(user.id, skill.id, Some("novice".to_string()))
        .await
        .unwrap();

    services.users().delete_user(user.id).await.unwrap();

    assert!(matches!(
        services.users().get_user(user.id).await,
        Err(AppError::NotFound)
    ));
    assert!(services.skills().users(skill.id).await.unwrap().is_empty());
    assert!(services.skills().get_skill(skill.id).await.is_ok());
}

#[tokio::test]
async fn test_stored_password_hash_verifies() {
    let (_db, services) = setup().await;
    let input = NewUser::with_password("erin", "erin@example.com", "s3cret-pass").unwrap();

    let user = services.users().create_user(input).await.unwrap();
    let fetched = services
        .users()
        .get_user_by_email("erin@example.com")
        .await
        .unwrap();

    assert_eq!(fetched.id, user.id);
    assert_ne!(fetched.password_hash, "s3cret-pass");
    assert!(fetched.verify_password("s3cret-pass"));
}
