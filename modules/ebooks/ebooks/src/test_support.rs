#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use ebooks_sdk::{NewEbook, NewReview, SecurityContext};
use sea_orm::DatabaseConnection;
use time::macros::date;
use uuid::Uuid;

use crate::domain::service::ServiceConfig;
use crate::infra::storage::db::{DbConfig, connect_db, run_migrations};
use crate::infra::storage::{OrmEbooksRepository, OrmReviewsRepository};
use crate::module::ConcreteAppServices;

#[must_use]
pub fn ctx_admin() -> SecurityContext {
    SecurityContext::builder()
        .subject_id(Uuid::new_v4())
        .admin(true)
        .build()
}

/// Create a security context for a specific non-admin subject.
#[must_use]
pub fn ctx_for_subject(subject_id: Uuid) -> SecurityContext {
    SecurityContext::builder().subject_id(subject_id).build()
}

#[must_use]
pub fn ctx_user() -> SecurityContext {
    ctx_for_subject(Uuid::new_v4())
}

#[must_use]
pub fn ctx_anonymous() -> SecurityContext {
    SecurityContext::anonymous()
}

/// Create an in-memory database for testing.
pub async fn inmem_db() -> DatabaseConnection {
    let cfg = DbConfig {
        url: "sqlite::memory:".to_owned(),
        max_conns: 1,
        min_conns: 1,
        ..DbConfig::default()
    };
    let db = connect_db(&cfg)
        .await
        .expect("Failed to connect to in-memory database");

    run_migrations(&db)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn build_services(db: DatabaseConnection, config: ServiceConfig) -> Arc<ConcreteAppServices> {
    Arc::new(ConcreteAppServices::new(
        OrmEbooksRepository::new(),
        OrmReviewsRepository::new(),
        db,
        config,
    ))
}

pub async fn setup() -> Arc<ConcreteAppServices> {
    build_services(inmem_db().await, ServiceConfig::default())
}

#[must_use]
pub fn new_ebook(title: &str) -> NewEbook {
    NewEbook {
        title: title.to_owned(),
        author: "Frank Herbert".to_owned(),
        description: "Desert planet politics".to_owned(),
        publication_date: date!(1965 - 08 - 01),
    }
}

#[must_use]
pub fn new_review(rating: i32) -> NewReview {
    NewReview {
        review_text: "Worth reading".to_owned(),
        review_rating: rating,
    }
}
