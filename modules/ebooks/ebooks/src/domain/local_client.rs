//! Local (in-process) client for the ebooks module.

use std::sync::Arc;

use async_trait::async_trait;
use ebooks_sdk::{
    Ebook, EbookFull, EbookPatch, EbooksClientV1, EbooksError, NewEbook, NewReview, Review,
    ReviewPatch, SecurityContext,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::module::ConcreteAppServices;

/// Local client wrapping the services.
///
/// Handed out by the module after `init()`; applies the same policies as the
/// REST surface.
pub struct EbooksLocalClient {
    services: Arc<ConcreteAppServices>,
}

impl EbooksLocalClient {
    #[must_use]
    pub(crate) fn new(services: Arc<ConcreteAppServices>) -> Self {
        Self { services }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> EbooksError {
    if matches!(e, DomainError::Database { .. }) {
        tracing::error!(operation = op, error = ?e, "ebooks call failed");
    } else {
        tracing::debug!(operation = op, error = %e, "ebooks call rejected");
    }
    e.into()
}

#[async_trait]
impl EbooksClientV1 for EbooksLocalClient {
    async fn list_ebooks(&self, ctx: SecurityContext) -> Result<Vec<EbookFull>, EbooksError> {
        self.services
            .ebooks
            .list_ebooks(&ctx)
            .await
            .map_err(|e| log_and_convert("list_ebooks", e))
    }

    async fn get_ebook(&self, ctx: SecurityContext, id: i64) -> Result<EbookFull, EbooksError> {
        self.services
            .ebooks
            .get_ebook(&ctx, id)
            .await
            .map_err(|e| log_and_convert("get_ebook", e))
    }

    async fn create_ebook(
        &self,
        ctx: SecurityContext,
        new_ebook: NewEbook,
    ) -> Result<Ebook, EbooksError> {
        self.services
            .ebooks
            .create_ebook(&ctx, new_ebook)
            .await
            .map_err(|e| log_and_convert("create_ebook", e))
    }

    async fn patch_ebook(
        &self,
        ctx: SecurityContext,
        id: i64,
        patch: EbookPatch,
    ) -> Result<EbookFull, EbooksError> {
        self.services
            .ebooks
            .patch_ebook(&ctx, id, patch)
            .await
            .map_err(|e| log_and_convert("patch_ebook", e))
    }

    async fn delete_ebook(&self, ctx: SecurityContext, id: i64) -> Result<(), EbooksError> {
        self.services
            .ebooks
            .delete_ebook(&ctx, id)
            .await
            .map_err(|e| log_and_convert("delete_ebook", e))
    }

    async fn list_my_reviews(
        &self,
        ctx: SecurityContext,
        ebook_id: i64,
    ) -> Result<Vec<Review>, EbooksError> {
        self.services
            .reviews
            .list_reviews(&ctx, ebook_id)
            .await
            .map_err(|e| log_and_convert("list_my_reviews", e))
    }

    async fn create_review(
        &self,
        ctx: SecurityContext,
        ebook_id: i64,
        new_review: NewReview,
    ) -> Result<Review, EbooksError> {
        self.services
            .reviews
            .create_review(&ctx, ebook_id, new_review)
            .await
            .map_err(|e| log_and_convert("create_review", e))
    }

    async fn get_review(&self, ctx: SecurityContext, id: i64) -> Result<Review, EbooksError> {
        self.services
            .reviews
            .get_review(&ctx, id)
            .await
            .map_err(|e| log_and_convert("get_review", e))
    }

    async fn patch_review(
        &self,
        ctx: SecurityContext,
        id: i64,
        patch: ReviewPatch,
    ) -> Result<Review, EbooksError> {
        self.services
            .reviews
            .patch_review(&ctx, id, patch)
            .await
            .map_err(|e| log_and_convert("patch_review", e))
    }

    async fn delete_review(&self, ctx: SecurityContext, id: i64) -> Result<(), EbooksError> {
        self.services
            .reviews
            .delete_review(&ctx, id)
            .await
            .map_err(|e| log_and_convert("delete_review", e))
    }

    async fn detach_author(
        &self,
        ctx: SecurityContext,
        user_id: Uuid,
    ) -> Result<u64, EbooksError> {
        self.services
            .reviews
            .detach_author(&ctx, user_id)
            .await
            .map_err(|e| log_and_convert("detach_author", e))
    }
}
