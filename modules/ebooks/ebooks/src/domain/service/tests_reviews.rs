#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use ebooks_sdk::{NewReview, ReviewPatch};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::module::ConcreteAppServices;
use crate::test_support::{
    build_services, ctx_admin, ctx_anonymous, ctx_for_subject, ctx_user, inmem_db, new_ebook,
    new_review, setup,
};

async fn seed_ebook(services: &Arc<ConcreteAppServices>, title: &str) -> i64 {
    services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook(title))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn review_is_owned_by_the_requester() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let author = Uuid::new_v4();

    let review = services
        .reviews
        .create_review(&ctx_for_subject(author), ebook_id, new_review(5))
        .await
        .unwrap();

    assert_eq!(review.ebook_id, ebook_id);
    assert_eq!(review.review_author, Some(author));
    assert_eq!(review.review_rating, 5);
    assert_eq!(review.review_date, review.review_updt);
}

#[tokio::test]
async fn second_review_by_same_user_is_rejected() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let ctx = ctx_user();

    services
        .reviews
        .create_review(&ctx, ebook_id, new_review(5))
        .await
        .unwrap();
    let again = services
        .reviews
        .create_review(&ctx, ebook_id, new_review(1))
        .await;
    assert!(matches!(again, Err(DomainError::DuplicateReview)));

    // Same user on another ebook, and another user on the same ebook, are fine
    let other_ebook = seed_ebook(&services, "Emma").await;
    services
        .reviews
        .create_review(&ctx, other_ebook, new_review(4))
        .await
        .unwrap();
    services
        .reviews
        .create_review(&ctx_user(), ebook_id, new_review(4))
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_after_guard_is_caught_by_unique_index() {
    use crate::domain::repos::{NewReviewRecord, ReviewsRepository};
    use crate::infra::storage::OrmReviewsRepository;

    let db = inmem_db().await;
    let services = build_services(db.clone(), ServiceConfig::default());
    let ebook_id = seed_ebook(&services, "Dune").await;

    let repo = OrmReviewsRepository::new();
    let author = Uuid::new_v4();
    let record = NewReviewRecord {
        ebook_id,
        review_author: author,
        review_text: String::new(),
        review_rating: 3,
        created_at: time::OffsetDateTime::now_utc(),
    };
    repo.create(&db, record.clone()).await.unwrap();
    let res = repo.create(&db, record).await;
    assert!(matches!(res, Err(DomainError::DuplicateReview)));
}

#[tokio::test]
async fn anonymous_cannot_review() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;

    let res = services
        .reviews
        .create_review(&ctx_anonymous(), ebook_id, new_review(5))
        .await;
    assert!(matches!(res, Err(DomainError::Unauthenticated)));
}

#[tokio::test]
async fn review_of_missing_ebook_is_not_found() {
    let services = setup().await;
    let res = services
        .reviews
        .create_review(&ctx_user(), 999, new_review(5))
        .await;
    assert!(matches!(res, Err(DomainError::EbookNotFound { id: 999 })));
}

#[tokio::test]
async fn rating_outside_range_is_rejected() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let ctx = ctx_user();

    for rating in [0, 6, -1] {
        let res = services
            .reviews
            .create_review(&ctx, ebook_id, new_review(rating))
            .await;
        assert!(
            matches!(res, Err(DomainError::Validation { ref field, .. }) if field == "review_rating"),
            "rating {rating}"
        );
    }

    for rating in [1, 5] {
        let ebook_id = seed_ebook(&services, &format!("Book {rating}")).await;
        services
            .reviews
            .create_review(&ctx, ebook_id, new_review(rating))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn list_only_shows_own_reviews() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let alice = ctx_user();
    let bob = ctx_user();

    let mine = services
        .reviews
        .create_review(&alice, ebook_id, new_review(5))
        .await
        .unwrap();
    services
        .reviews
        .create_review(&bob, ebook_id, new_review(2))
        .await
        .unwrap();

    let listed = services.reviews.list_reviews(&alice, ebook_id).await.unwrap();
    assert_eq!(listed, vec![mine]);

    let anon = services
        .reviews
        .list_reviews(&ctx_anonymous(), ebook_id)
        .await
        .unwrap();
    assert!(anon.is_empty());

    let unknown = services.reviews.list_reviews(&alice, 12345).await.unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn only_the_author_may_modify() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let author = ctx_user();
    let review = services
        .reviews
        .create_review(&author, ebook_id, new_review(3))
        .await
        .unwrap();

    // Readable by anyone
    let fetched = services
        .reviews
        .get_review(&ctx_anonymous(), review.id)
        .await
        .unwrap();
    assert_eq!(fetched, review);

    let patch = ReviewPatch {
        review_rating: Some(1),
        ..ReviewPatch::default()
    };
    let res = services
        .reviews
        .patch_review(&ctx_user(), review.id, patch.clone())
        .await;
    assert!(matches!(res, Err(DomainError::Forbidden)));

    // Admin privilege does not extend to other people's reviews
    let res = services
        .reviews
        .delete_review(&ctx_admin(), review.id)
        .await;
    assert!(matches!(res, Err(DomainError::Forbidden)));

    let res = services
        .reviews
        .patch_review(&ctx_anonymous(), review.id, patch)
        .await;
    assert!(matches!(res, Err(DomainError::Unauthenticated)));

    let unchanged = services
        .reviews
        .get_review(&author, review.id)
        .await
        .unwrap();
    assert_eq!(unchanged.review_rating, 3);
}

#[tokio::test]
async fn author_updates_text_and_rating() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let author = ctx_user();
    let review = services
        .reviews
        .create_review(&author, ebook_id, new_review(3))
        .await
        .unwrap();

    let patched = services
        .reviews
        .patch_review(
            &author,
            review.id,
            ReviewPatch {
                review_rating: Some(4),
                ..ReviewPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.review_rating, 4);
    assert_eq!(patched.review_text, review.review_text);
    assert_eq!(patched.review_date, review.review_date);
    assert!(patched.review_updt >= review.review_updt);

    let replaced = services
        .reviews
        .replace_review(
            &author,
            review.id,
            NewReview {
                review_text: "Changed my mind".to_owned(),
                review_rating: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(replaced.review_text, "Changed my mind");
    assert_eq!(replaced.review_rating, 2);
    assert_eq!(replaced.review_author, review.review_author);
    assert_eq!(replaced.ebook_id, ebook_id);

    let bad = services
        .reviews
        .patch_review(
            &author,
            review.id,
            ReviewPatch {
                review_rating: Some(9),
                ..ReviewPatch::default()
            },
        )
        .await;
    assert!(matches!(bad, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn author_deletes_review_and_can_review_again() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let author = ctx_user();
    let review = services
        .reviews
        .create_review(&author, ebook_id, new_review(3))
        .await
        .unwrap();

    services
        .reviews
        .delete_review(&author, review.id)
        .await
        .unwrap();
    let gone = services.reviews.get_review(&author, review.id).await;
    assert!(matches!(gone, Err(DomainError::ReviewNotFound { .. })));

    services
        .reviews
        .create_review(&author, ebook_id, new_review(4))
        .await
        .unwrap();
}

#[tokio::test]
async fn detached_reviews_survive_without_author() {
    let services = setup().await;
    let ebook_id = seed_ebook(&services, "Dune").await;
    let user_id = Uuid::new_v4();
    let user = ctx_for_subject(user_id);
    let review = services
        .reviews
        .create_review(&user, ebook_id, new_review(5))
        .await
        .unwrap();

    let res = services.reviews.detach_author(&user, user_id).await;
    assert!(matches!(res, Err(DomainError::Forbidden)));

    let detached = services
        .reviews
        .detach_author(&ctx_admin(), user_id)
        .await
        .unwrap();
    assert_eq!(detached, 1);

    let orphan = services
        .reviews
        .get_review(&ctx_anonymous(), review.id)
        .await
        .unwrap();
    assert_eq!(orphan.review_author, None);

    // Nobody owns it any more, not even the former author
    let res = services.reviews.delete_review(&user, review.id).await;
    assert!(matches!(res, Err(DomainError::Forbidden)));

    let full = services
        .ebooks
        .get_ebook(&ctx_anonymous(), ebook_id)
        .await
        .unwrap();
    assert_eq!(full.reviews.len(), 1);
}
