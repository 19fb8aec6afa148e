use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::EbooksError;
use crate::models::{Ebook, EbookFull, EbookPatch, NewEbook, NewReview, Review, ReviewPatch};
use crate::security::SecurityContext;

/// Transport-agnostic client for the ebooks module.
///
/// Every call takes the requester's [`SecurityContext`]; the same access
/// rules apply as on the REST surface.
#[async_trait]
pub trait EbooksClientV1: Send + Sync {
    async fn list_ebooks(&self, ctx: SecurityContext) -> Result<Vec<EbookFull>, EbooksError>;

    async fn get_ebook(&self, ctx: SecurityContext, id: i64) -> Result<EbookFull, EbooksError>;

    async fn create_ebook(
        &self,
        ctx: SecurityContext,
        new_ebook: NewEbook,
    ) -> Result<Ebook, EbooksError>;

    async fn patch_ebook(
        &self,
        ctx: SecurityContext,
        id: i64,
        patch: EbookPatch,
    ) -> Result<EbookFull, EbooksError>;

    async fn delete_ebook(&self, ctx: SecurityContext, id: i64) -> Result<(), EbooksError>;

    /// Reviews of `ebook_id` written by the requester. Empty for anonymous callers.
    async fn list_my_reviews(
        &self,
        ctx: SecurityContext,
        ebook_id: i64,
    ) -> Result<Vec<Review>, EbooksError>;

    async fn create_review(
        &self,
        ctx: SecurityContext,
        ebook_id: i64,
        new_review: NewReview,
    ) -> Result<Review, EbooksError>;

    async fn get_review(&self, ctx: SecurityContext, id: i64) -> Result<Review, EbooksError>;

    async fn patch_review(
        &self,
        ctx: SecurityContext,
        id: i64,
        patch: ReviewPatch,
    ) -> Result<Review, EbooksError>;

    async fn delete_review(&self, ctx: SecurityContext, id: i64) -> Result<(), EbooksError>;

    /// Null out the authorship of every review written by `user_id`.
    async fn detach_author(
        &self,
        ctx: SecurityContext,
        user_id: Uuid,
    ) -> Result<u64, EbooksError>;
}
