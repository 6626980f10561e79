//! Update and delete behavior for skills, listings and reviews against SQLite.

mod support;

use common::AppError;
use domain::{
    ListingChanges, NewReview, NewSkill, NewTransaction, ReviewChanges, SkillChanges,
};
use marketplace_service_lib::repository::Repositories;
use marketplace_service_lib::service::ServiceContainer;

use support::{create_listing, create_skill, create_user, setup};

#[tokio::test]
async fn test_delete_skill_offered_by_listing_is_restricted() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let skill = create_skill(&services, "Joinery").await;
    let listing = create_listing(&services, &owner, &skill, "Make a stool").await;

    let result = services.skills().delete_skill(skill.id).await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    assert!(services.skills().get_skill(skill.id).await.is_ok());

    services.listings().delete_listing(listing.id).await.unwrap();
    services.skills().delete_skill(skill.id).await.unwrap();
    assert!(matches!(
        services.skills().get_skill(skill.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_skill_removes_pairings() {
    let (_db, services) = setup().await;
    let user = create_user(&services, "hana").await;
    let skill = create_skill(&services, "Knitting").await;
    services
        .skills()
        .add_user_skill(user.id, skill.id, Some("expert".to_string()))
        .await
        .unwrap();

    services.skills().delete_skill(skill.id).await.unwrap();

    assert!(services.users().skills(user.id).await.unwrap().is_empty());
    assert!(services.users().get_user(user.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_listing_with_transactions_is_restricted() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Tutoring").await;
    let listing = create_listing(&services, &owner, &skill, "Algebra lessons").await;
    let tx = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: buyer.id,
        })
        .await
        .unwrap();

    let result = services.listings().delete_listing(listing.id).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    assert!(services.listings().get_listing(listing.id).await.is_ok());

    services.transactions().delete_transaction(tx.id).await.unwrap();
    services.listings().delete_listing(listing.id).await.unwrap();
    assert!(matches!(
        services.listings().get_listing(listing.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_user_referenced_only_by_reviews_is_restricted() {
    let (db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let critic = create_user(&services, "critic").await;
    let skill = create_skill(&services, "Framing").await;
    let listing = create_listing(&services, &owner, &skill, "Frame a print").await;
    let tx = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: buyer.id,
        })
        .await
        .unwrap();

    // The store does not check who the parties are
    let repos = Repositories::from_connection(db.get_connection());
    let review = repos
        .reviews
        .create(NewReview {
            transaction_id: tx.id,
            reviewer_id: critic.id,
            reviewee_id: owner.id,
            rating: 2,
            comment: None,
        })
        .await
        .unwrap();

    let result = services.users().delete_user(critic.id).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    assert!(services.users().get_user(critic.id).await.is_ok());

    services.reviews().delete_review(review.id).await.unwrap();
    services.users().delete_user(critic.id).await.unwrap();
}

#[tokio::test]
async fn test_update_skill() {
    let (_db, services) = setup().await;
    let skill = services
        .skills()
        .create_skill(NewSkill {
            name: "Cooking".to_string(),
            description: Some("Home meals".to_string()),
        })
        .await
        .unwrap();

    let updated = services
        .skills()
        .update_skill(
            skill.id,
            SkillChanges {
                name: Some("Baking".to_string()),
                description: Some(None),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Baking");
    assert!(updated.description.is_none());
    assert_eq!(services.skills().get_skill(skill.id).await.unwrap(), updated);

    let result = services
        .skills()
        .update_skill(
            999,
            SkillChanges {
                name: Some("Nothing".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_listing() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let first = create_skill(&services, "Drawing").await;
    let second = create_skill(&services, "Painting").await;
    let listing = create_listing(&services, &owner, &first, "Portraits").await;

    let updated = services
        .listings()
        .update_listing(
            listing.id,
            ListingChanges {
                skill_id: Some(second.id),
                title: Some("Oil portraits".to_string()),
                description: Some(Some("From a photo".to_string())),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.skill_id, second.id);
    assert_eq!(updated.title, "Oil portraits");
    assert_eq!(updated.description.as_deref(), Some("From a photo"));
    assert_eq!(updated.user_id, owner.id);

    let result = services
        .listings()
        .update_listing(
            listing.id,
            ListingChanges {
                skill_id: Some(999),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    let unchanged = services.listings().get_listing(listing.id).await.unwrap();
    assert_eq!(unchanged.skill_id, second.id);
}

#[tokio::test]
async fn test_update_review() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Editing").await;
    let listing = create_listing(&services, &owner, &skill, "Proofread an essay").await;
    let tx = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: buyer.id,
        })
        .await
        .unwrap();
    let review = services
        .reviews()
        .create_review(NewReview {
            transaction_id: tx.id,
            reviewer_id: owner.id,
            reviewee_id: buyer.id,
            rating: 3,
            comment: Some("Late reply".to_string()),
        })
        .await
        .unwrap();

    let updated = services
        .reviews()
        .update_review(
            review.id,
            ReviewChanges {
                rating: Some(5),
                comment: Some(None),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.rating, 5);
    assert!(updated.comment.is_none());
    assert_eq!(updated.reviewer_id, owner.id);
    assert_eq!(services.reviews().get_review(review.id).await.unwrap(), updated);

    let result = services
        .reviews()
        .update_review(999, ReviewChanges::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}
