use std::sync::Arc;

use ebooks_sdk::{MAX_RATING, MIN_RATING, NewReview, Review, ReviewPatch, SecurityContext};
use http::Method;
use sea_orm::DatabaseConnection;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::policy::{
    AccessPolicy, AdminOrReadOnly, AuthenticatedOrReadOnly, ReviewAuthorOrReadOnly,
};
use crate::domain::repos::{EbooksRepository, NewReviewRecord, ReviewsRepository};

use super::{actions, now_utc};

/// Reviews service.
///
/// Creation is guarded by the one-review-per-user rule; every operation on an
/// existing review goes through [`ReviewAuthorOrReadOnly`] once the review
/// has been loaded.
pub(crate) struct ReviewsService<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> {
    db: DatabaseConnection,
    ebooks: Arc<ER>,
    repo: Arc<RR>,
}

impl<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> ReviewsService<ER, RR> {
    pub fn new(db: DatabaseConnection, ebooks: Arc<ER>, repo: Arc<RR>) -> Self {
        Self { db, ebooks, repo }
    }
}

// Business logic methods
impl<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> ReviewsService<ER, RR> {
    /// Reviews of `ebook_id` written by the requester.
    ///
    /// Anonymous callers get an empty list without touching the store. The
    /// ebook is not resolved, so an unknown id also yields an empty list.
    #[instrument(skip(self, ctx))]
    pub async fn list_reviews(
        &self,
        ctx: &SecurityContext,
        ebook_id: i64,
    ) -> Result<Vec<Review>, DomainError> {
        tracing::debug!("Listing own reviews");

        let Some(author) = ctx.subject_id() else {
            return Ok(Vec::new());
        };

        let reviews = self
            .repo
            .list_by_ebook_and_author(&self.db, ebook_id, author)
            .await?;

        tracing::debug!("Successfully listed {} reviews", reviews.len());
        Ok(reviews)
    }

    /// Create a review of `ebook_id` authored by the requester.
    ///
    /// Anonymous callers and invalid payloads are rejected first; then the
    /// ebook is resolved and the requester's existing review is looked up.
    /// The unique index on `(ebook_id, review_author)` catches the race
    /// between that lookup and the insert.
    #[instrument(skip(self, ctx, new_review))]
    pub async fn create_review(
        &self,
        ctx: &SecurityContext,
        ebook_id: i64,
        new_review: NewReview,
    ) -> Result<Review, DomainError> {
        tracing::info!("Creating new review");

        AuthenticatedOrReadOnly.check(ctx, &actions::CREATE)?;
        let Some(author) = ctx.subject_id() else {
            return Err(DomainError::Unauthenticated);
        };

        Self::validate_rating(new_review.review_rating)?;

        if self.ebooks.get(&self.db, ebook_id).await?.is_none() {
            return Err(DomainError::ebook_not_found(ebook_id));
        }

        if self.repo.exists_for_author(&self.db, ebook_id, author).await? {
            return Err(DomainError::DuplicateReview);
        }

        let created = self
            .repo
            .create(
                &self.db,
                NewReviewRecord {
                    ebook_id,
                    review_author: author,
                    review_text: new_review.review_text,
                    review_rating: new_review.review_rating,
                    created_at: now_utc(),
                },
            )
            .await?;

        tracing::info!("Successfully created review with id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, ctx), fields(review_id = id))]
    pub async fn get_review(&self, ctx: &SecurityContext, id: i64) -> Result<Review, DomainError> {
        tracing::debug!("Getting review by id");

        let review = self.load(id).await?;
        ReviewAuthorOrReadOnly.check_object(ctx, &actions::GET, &review)?;

        Ok(review)
    }

    /// Full update of the text and rating.
    #[instrument(skip(self, ctx, new_review), fields(review_id = id))]
    pub async fn replace_review(
        &self,
        ctx: &SecurityContext,
        id: i64,
        new_review: NewReview,
    ) -> Result<Review, DomainError> {
        tracing::info!("Replacing review");
        self.apply_patch(ctx, &actions::REPLACE, id, new_review.into())
            .await
    }

    #[instrument(skip(self, ctx, patch), fields(review_id = id))]
    pub async fn patch_review(
        &self,
        ctx: &SecurityContext,
        id: i64,
        patch: ReviewPatch,
    ) -> Result<Review, DomainError> {
        tracing::info!("Patching review");
        self.apply_patch(ctx, &actions::PATCH, id, patch).await
    }

    #[instrument(skip(self, ctx), fields(review_id = id))]
    pub async fn delete_review(&self, ctx: &SecurityContext, id: i64) -> Result<(), DomainError> {
        tracing::info!("Deleting review");

        let review = self.load(id).await?;
        ReviewAuthorOrReadOnly.check_object(ctx, &actions::DELETE, &review)?;

        if !self.repo.delete(&self.db, id).await? {
            return Err(DomainError::review_not_found(id));
        }

        tracing::info!("Successfully deleted review");
        Ok(())
    }

    /// Orphan every review written by `user_id`. Called when that user
    /// account goes away; the reviews stay, without an author.
    #[instrument(skip(self, ctx), fields(user_id = %user_id))]
    pub async fn detach_author(
        &self,
        ctx: &SecurityContext,
        user_id: Uuid,
    ) -> Result<u64, DomainError> {
        tracing::info!("Detaching reviews from author");

        AdminOrReadOnly.check(ctx, &actions::DELETE)?;

        let detached = self.repo.detach_author(&self.db, user_id).await?;

        tracing::info!(detached, "Successfully detached reviews");
        Ok(detached)
    }

    async fn load(&self, id: i64) -> Result<Review, DomainError> {
        self.repo
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::review_not_found(id))
    }

    async fn apply_patch(
        &self,
        ctx: &SecurityContext,
        method: &Method,
        id: i64,
        patch: ReviewPatch,
    ) -> Result<Review, DomainError> {
        let mut current = self.load(id).await?;
        ReviewAuthorOrReadOnly.check_object(ctx, method, &current)?;

        if let Some(rating) = patch.review_rating {
            Self::validate_rating(rating)?;
            current.review_rating = rating;
        }
        if let Some(text) = patch.review_text {
            current.review_text = text;
        }
        current.review_updt = now_utc();

        let updated = self.repo.update(&self.db, current).await?;

        tracing::info!("Successfully updated review");
        Ok(updated)
    }

    fn validate_rating(rating: i32) -> Result<(), DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::validation(
                "review_rating",
                format!("Ensure this value is between {MIN_RATING} and {MAX_RATING} (got {rating})."),
            ));
        }
        Ok(())
    }
}
