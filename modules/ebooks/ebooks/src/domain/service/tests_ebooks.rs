#![allow(clippy::unwrap_used, clippy::expect_used)]

use ebooks_sdk::EbookPatch;
use time::macros::date;

use crate::domain::error::DomainError;
use crate::domain::service::ServiceConfig;
use crate::test_support::{
    build_services, ctx_admin, ctx_anonymous, ctx_user, inmem_db, new_ebook, new_review, setup,
};

#[tokio::test]
async fn admin_creates_and_everyone_reads() {
    let services = setup().await;
    let created = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Dune"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "Dune");

    let listed = services.ebooks.list_ebooks(&ctx_anonymous()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].ebook, created);
    assert!(listed[0].reviews.is_empty());

    let fetched = services
        .ebooks
        .get_ebook(&ctx_user(), created.id)
        .await
        .unwrap();
    assert_eq!(fetched.ebook, created);
}

#[tokio::test]
async fn non_admin_mutations_are_rejected() {
    let services = setup().await;

    let anon = services
        .ebooks
        .create_ebook(&ctx_anonymous(), new_ebook("Dune"))
        .await;
    assert!(matches!(anon, Err(DomainError::Unauthenticated)));

    let user = services
        .ebooks
        .create_ebook(&ctx_user(), new_ebook("Dune"))
        .await;
    assert!(matches!(user, Err(DomainError::Forbidden)));

    let id = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Dune"))
        .await
        .unwrap()
        .id;

    let patch = services
        .ebooks
        .patch_ebook(&ctx_user(), id, EbookPatch::default())
        .await;
    assert!(matches!(patch, Err(DomainError::Forbidden)));

    let delete = services.ebooks.delete_ebook(&ctx_user(), id).await;
    assert!(matches!(delete, Err(DomainError::Forbidden)));

    // Nothing changed
    assert_eq!(services.ebooks.list_ebooks(&ctx_anonymous()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_ebook_is_not_found() {
    let services = setup().await;

    let get = services.ebooks.get_ebook(&ctx_anonymous(), 42).await;
    assert!(matches!(get, Err(DomainError::EbookNotFound { id: 42 })));

    let replace = services
        .ebooks
        .replace_ebook(&ctx_admin(), 42, new_ebook("Dune"))
        .await;
    assert!(matches!(replace, Err(DomainError::EbookNotFound { id: 42 })));

    let delete = services.ebooks.delete_ebook(&ctx_admin(), 42).await;
    assert!(matches!(delete, Err(DomainError::EbookNotFound { id: 42 })));
}

#[tokio::test]
async fn blank_and_overlong_fields_are_rejected() {
    let services = build_services(
        inmem_db().await,
        ServiceConfig {
            max_title_length: 5,
            ..ServiceConfig::default()
        },
    );

    let mut blank = new_ebook("Dune");
    blank.description = "   ".to_owned();
    let res = services.ebooks.create_ebook(&ctx_admin(), blank).await;
    match res {
        Err(DomainError::Validation { field, message }) => {
            assert_eq!(field, "description");
            assert_eq!(message, "This field may not be blank.");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let res = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Children of Dune"))
        .await;
    assert!(matches!(res, Err(DomainError::Validation { ref field, .. }) if field == "title"));

    // Length counts characters, not bytes
    let ok = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Ñandú"))
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn patch_updates_only_supplied_fields() {
    let services = setup().await;
    let admin = ctx_admin();
    let created = services
        .ebooks
        .create_ebook(&admin, new_ebook("Dune"))
        .await
        .unwrap();

    let patched = services
        .ebooks
        .patch_ebook(
            &admin,
            created.id,
            EbookPatch {
                publication_date: Some(date!(1966 - 01 - 01)),
                ..EbookPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.ebook.title, created.title);
    assert_eq!(patched.ebook.author, created.author);
    assert_eq!(patched.ebook.description, created.description);
    assert_eq!(patched.ebook.publication_date, date!(1966 - 01 - 01));
}

#[tokio::test]
async fn replace_returns_ebook_with_reviews() {
    let services = setup().await;
    let admin = ctx_admin();
    let id = services
        .ebooks
        .create_ebook(&admin, new_ebook("Dune"))
        .await
        .unwrap()
        .id;
    services
        .reviews
        .create_review(&ctx_user(), id, new_review(5))
        .await
        .unwrap();

    let replaced = services
        .ebooks
        .replace_ebook(&admin, id, new_ebook("Dune Messiah"))
        .await
        .unwrap();
    assert_eq!(replaced.ebook.title, "Dune Messiah");
    assert_eq!(replaced.reviews.len(), 1);
}

#[tokio::test]
async fn nested_reviews_include_every_author() {
    let services = setup().await;
    let id = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Dune"))
        .await
        .unwrap()
        .id;
    let other = services
        .ebooks
        .create_ebook(&ctx_admin(), new_ebook("Emma"))
        .await
        .unwrap()
        .id;

    for rating in [3, 4] {
        services
            .reviews
            .create_review(&ctx_user(), id, new_review(rating))
            .await
            .unwrap();
    }

    let full = services.ebooks.get_ebook(&ctx_anonymous(), id).await.unwrap();
    let ratings: Vec<i32> = full.reviews.iter().map(|r| r.review_rating).collect();
    assert_eq!(ratings, [3, 4]);

    let listed = services.ebooks.list_ebooks(&ctx_anonymous()).await.unwrap();
    let empty = listed.iter().find(|e| e.ebook.id == other).unwrap();
    assert!(empty.reviews.is_empty());
}

#[tokio::test]
async fn delete_removes_the_ebook_and_its_reviews() {
    let services = setup().await;
    let admin = ctx_admin();
    let id = services
        .ebooks
        .create_ebook(&admin, new_ebook("Dune"))
        .await
        .unwrap()
        .id;
    let review = services
        .reviews
        .create_review(&ctx_user(), id, new_review(4))
        .await
        .unwrap();

    services.ebooks.delete_ebook(&admin, id).await.unwrap();

    let get = services.ebooks.get_ebook(&admin, id).await;
    assert!(matches!(get, Err(DomainError::EbookNotFound { .. })));
    let review = services.reviews.get_review(&admin, review.id).await;
    assert!(matches!(review, Err(DomainError::ReviewNotFound { .. })));
}
