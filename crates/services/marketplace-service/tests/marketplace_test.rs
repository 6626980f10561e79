//! Skill, listing, transaction and review tests against SQLite.

mod support;

use sea_orm::{ConnectionTrait, Statement};

use common::AppError;
use domain::{NewListing, NewReview, NewTransaction, TransactionStatus};
use marketplace_service_lib::service::ServiceContainer;

use support::{create_listing, create_skill, create_user, setup};

#[tokio::test]
async fn test_carpentry_scenario() {
    let (_db, services) = setup().await;
    let carpentry = create_skill(&services, "Carpentry").await;
    let u1 = create_user(&services, "u1").await;
    let u2 = create_user(&services, "u2").await;
    let listing = create_listing(&services, &u1, &carpentry, "Build a shelf").await;

    let tx = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: u2.id,
        })
        .await
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Pending);
    assert!(tx.completed_at.is_none());

    services.transactions().complete_transaction(tx.id).await.unwrap();

    let fetched = services.transactions().get_transaction(tx.id).await.unwrap();
    assert_eq!(fetched.status, TransactionStatus::Completed);
    assert!(fetched.completed_at.is_some());
}

#[tokio::test]
async fn test_skill_association_is_symmetric() {
    let (_db, services) = setup().await;
    let user = create_user(&services, "maria").await;
    let skill = create_skill(&services, "Pottery").await;
    let other = create_skill(&services, "Weaving").await;

    services
        .skills()
        .add_user_skill(user.id, skill.id, Some("expert".to_string()))
        .await
        .unwrap();
    services
        .skills()
        .add_user_skill(user.id, other.id, None)
        .await
        .unwrap();

    let skills = services.users().skills(user.id).await.unwrap();
    let pottery: Vec<_> = skills.iter().filter(|s| s.skill.id == skill.id).collect();
    assert_eq!(pottery.len(), 1);
    assert_eq!(pottery[0].proficiency_level.as_deref(), Some("expert"));

    let holders = services.skills().users(skill.id).await.unwrap();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].user.id, user.id);
    assert_eq!(holders[0].proficiency_level.as_deref(), Some("expert"));
}

#[tokio::test]
async fn test_duplicate_skill_pairing_is_constraint_violation() {
    let (_db, services) = setup().await;
    let user = create_user(&services, "ivan").await;
    let skill = create_skill(&services, "Tiling").await;

    services
        .skills()
        .add_user_skill(user.id, skill.id, Some("novice".to_string()))
        .await
        .unwrap();
    let result = services
        .skills()
        .add_user_skill(user.id, skill.id, Some("expert".to_string()))
        .await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    let updated = services
        .skills()
        .set_proficiency(user.id, skill.id, Some("expert".to_string()))
        .await
        .unwrap();
    assert_eq!(updated.proficiency_level.as_deref(), Some("expert"));

    services
        .skills()
        .remove_user_skill(user.id, skill.id)
        .await
        .unwrap();
    assert!(services.users().skills(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_with_unknown_owner_is_constraint_violation() {
    let (_db, services) = setup().await;
    let skill = create_skill(&services, "Roofing").await;

    let result = services
        .listings()
        .create_listing(NewListing {
            user_id: 999,
            skill_id: skill.id,
            title: "Patch a roof".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_relation_views() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Sewing").await;
    let first = create_listing(&services, &owner, &skill, "Hem trousers").await;
    let second = create_listing(&services, &owner, &skill, "Patch a jacket").await;

    services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: second.id,
            requester_id: buyer.id,
        })
        .await
        .unwrap();

    let owned = services.users().listings(owner.id).await.unwrap();
    assert_eq!(
        owned.iter().map(|l| l.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );
    assert_eq!(services.skills().listings(skill.id).await.unwrap().len(), 2);
    assert!(services.listings().transactions(first.id).await.unwrap().is_empty());
    assert_eq!(services.listings().transactions(second.id).await.unwrap().len(), 1);
    assert_eq!(services.users().transactions(buyer.id).await.unwrap().len(), 1);
    assert!(services.users().transactions(owner.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_terminal_statuses_do_not_move() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Painting").await;
    let listing = create_listing(&services, &owner, &skill, "Paint a fence").await;
    let request = NewTransaction {
        listing_id: listing.id,
        requester_id: buyer.id,
    };

    let cancelled = services.transactions().request_transaction(request).await.unwrap();
    let cancelled = services
        .transactions()
        .cancel_transaction(cancelled.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
    assert!(cancelled.completed_at.is_none());

    let result = services.transactions().complete_transaction(cancelled.id).await;
    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    let completed = services.transactions().request_transaction(request).await.unwrap();
    services
        .transactions()
        .complete_transaction(completed.id)
        .await
        .unwrap();
    let result = services.transactions().cancel_transaction(completed.id).await;
    assert!(matches!(result, Err(AppError::BusinessRule(_))));

    let unchanged = services
        .transactions()
        .get_transaction(completed.id)
        .await
        .unwrap();
    assert_eq!(unchanged.status, TransactionStatus::Completed);
    assert!(unchanged.completed_at.is_some());
}

#[tokio::test]
async fn test_requesting_own_listing_is_rejected() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let skill = create_skill(&services, "Baking").await;
    let listing = create_listing(&services, &owner, &skill, "Bake bread").await;

    let result = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: owner.id,
        })
        .await;

    assert!(matches!(result, Err(AppError::BusinessRule(_))));
    assert!(services.listings().transactions(listing.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reviews_between_parties() {
    let (_db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Gardening").await;
    let listing = create_listing(&services, &owner, &skill, "Prune a hedge").await;
    let tx = services
        .transactions()
        .request_transaction(NewTransaction {
            listing_id: listing.id,
            requester_id: buyer.id,
        })
        .await
        .unwrap();

    let self_review = services
        .reviews()
        .create_review(NewReview {
            transaction_id: tx.id,
            reviewer_id: buyer.id,
            reviewee_id: buyer.id,
            rating: 5,
            comment: None,
        })
        .await;
    assert!(matches!(self_review, Err(AppError::BusinessRule(_))));

    let review = services
        .reviews()
        .create_review(NewReview {
            transaction_id: tx.id,
            reviewer_id: buyer.id,
            reviewee_id: owner.id,
            rating: 4,
            comment: Some("Tidy work".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(services.transactions().reviews(tx.id).await.unwrap(), vec![review.clone()]);
    assert_eq!(services.users().reviews_given(buyer.id).await.unwrap().len(), 1);
    assert_eq!(services.users().reviews_received(owner.id).await.unwrap().len(), 1);
    assert!(services.users().reviews_received(buyer.id).await.unwrap().is_empty());

    // Reviews pin their transaction
    let result = services.transactions().delete_transaction(tx.id).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    services.reviews().delete_review(review.id).await.unwrap();
    services.transactions().delete_transaction(tx.id).await.unwrap();
    assert!(matches!(
        services.transactions().get_transaction(tx.id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_unknown_status_rejected_by_check_constraint() {
    let (db, services) = setup().await;
    let owner = create_user(&services, "owner").await;
    let buyer = create_user(&services, "buyer").await;
    let skill = create_skill(&services, "Masonry").await;
    let listing = create_listing(&services, &owner, &skill, "Lay bricks").await;

    let conn = db.connection();
    let sql = format!(
        "INSERT INTO transactions (listing_id, requester_id, status, created_at) \
         VALUES ({}, {}, 'refunded', CURRENT_TIMESTAMP)",
        listing.id, buyer.id
    );
    let result = conn
        .execute(Statement::from_string(conn.get_database_backend(), sql))
        .await
        .map_err(AppError::from);

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}
