use async_trait::async_trait;
use ebooks_sdk::{Ebook, NewEbook, Review};
use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Review row about to be inserted. Author and ebook are resolved by the
/// service, never taken from the request payload.
#[derive(Debug, Clone)]
pub struct NewReviewRecord {
    pub ebook_id: i64,
    pub review_author: Uuid,
    pub review_text: String,
    pub review_rating: i32,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait EbooksRepository: Send + Sync {
    async fn list<C: ConnectionTrait + Sync>(&self, conn: &C) -> Result<Vec<Ebook>, DomainError>;

    async fn get<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Ebook>, DomainError>;

    async fn create<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        new_ebook: NewEbook,
    ) -> Result<Ebook, DomainError>;

    async fn update<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook: Ebook,
    ) -> Result<Ebook, DomainError>;

    async fn delete<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait ReviewsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Review>, DomainError>;

    /// Reviews of the given ebooks, ordered by ebook then review id.
    async fn list_for_ebooks<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_ids: &[i64],
    ) -> Result<Vec<Review>, DomainError>;

    async fn list_by_ebook_and_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
        author: Uuid,
    ) -> Result<Vec<Review>, DomainError>;

    async fn exists_for_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
        author: Uuid,
    ) -> Result<bool, DomainError>;

    /// Insert a review. A unique-index hit on `(ebook_id, review_author)`
    /// surfaces as [`DomainError::DuplicateReview`].
    async fn create<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        record: NewReviewRecord,
    ) -> Result<Review, DomainError>;

    async fn update<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        review: Review,
    ) -> Result<Review, DomainError>;

    async fn delete<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<bool, DomainError>;

    async fn delete_for_ebook<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
    ) -> Result<u64, DomainError>;

    /// Null out `review_author` on every review written by `author`.
    /// `review_updt` is left alone: the review itself did not change.
    async fn detach_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        author: Uuid,
    ) -> Result<u64, DomainError>;
}
