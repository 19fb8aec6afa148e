use std::collections::HashMap;
use std::sync::Arc;

use ebooks_sdk::{Ebook, EbookFull, EbookPatch, NewEbook, Review, SecurityContext};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::policy::{AccessPolicy, AdminOrReadOnly};
use crate::domain::repos::{EbooksRepository, ReviewsRepository};
use crate::infra::storage::db::db_err;

use super::{ServiceConfig, actions};

/// Ebooks service.
///
/// Reads are open to every caller; every mutation goes through
/// [`AdminOrReadOnly`] before the store is touched.
pub(crate) struct EbooksService<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> {
    db: DatabaseConnection,
    repo: Arc<ER>,
    reviews: Arc<RR>,
    config: ServiceConfig,
}

impl<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> EbooksService<ER, RR> {
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<ER>,
        reviews: Arc<RR>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            db,
            repo,
            reviews,
            config,
        }
    }
}

// Business logic methods
impl<ER: EbooksRepository + 'static, RR: ReviewsRepository + 'static> EbooksService<ER, RR> {
    /// List every ebook together with all of its reviews.
    #[instrument(skip(self, ctx))]
    pub async fn list_ebooks(&self, ctx: &SecurityContext) -> Result<Vec<EbookFull>, DomainError> {
        tracing::debug!("Listing ebooks");

        AdminOrReadOnly.check(ctx, &actions::LIST)?;

        let ebooks = self.repo.list(&self.db).await?;
        let ids: Vec<i64> = ebooks.iter().map(|e| e.id).collect();
        let mut by_ebook: HashMap<i64, Vec<Review>> = HashMap::new();
        for review in self.reviews.list_for_ebooks(&self.db, &ids).await? {
            by_ebook.entry(review.ebook_id).or_default().push(review);
        }

        let full: Vec<EbookFull> = ebooks
            .into_iter()
            .map(|ebook| {
                let reviews = by_ebook.remove(&ebook.id).unwrap_or_default();
                EbookFull { ebook, reviews }
            })
            .collect();

        tracing::debug!("Successfully listed {} ebooks", full.len());
        Ok(full)
    }

    #[instrument(skip(self, ctx), fields(ebook_id = id))]
    pub async fn get_ebook(&self, ctx: &SecurityContext, id: i64) -> Result<EbookFull, DomainError> {
        tracing::debug!("Getting ebook by id");

        AdminOrReadOnly.check(ctx, &actions::GET)?;

        let ebook = self
            .repo
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::ebook_not_found(id))?;
        let reviews = self.reviews.list_for_ebooks(&self.db, &[id]).await?;

        Ok(EbookFull { ebook, reviews })
    }

    #[instrument(skip(self, ctx), fields(title = %new_ebook.title))]
    pub async fn create_ebook(
        &self,
        ctx: &SecurityContext,
        new_ebook: NewEbook,
    ) -> Result<Ebook, DomainError> {
        tracing::info!("Creating new ebook");

        AdminOrReadOnly.check(ctx, &actions::CREATE)?;
        self.validate_new_ebook(&new_ebook)?;

        let created = self.repo.create(&self.db, new_ebook).await?;

        tracing::info!("Successfully created ebook with id={}", created.id);
        Ok(created)
    }

    /// Full update: every writable field is replaced.
    #[instrument(skip(self, ctx, new_ebook), fields(ebook_id = id))]
    pub async fn replace_ebook(
        &self,
        ctx: &SecurityContext,
        id: i64,
        new_ebook: NewEbook,
    ) -> Result<EbookFull, DomainError> {
        tracing::info!("Replacing ebook");

        AdminOrReadOnly.check(ctx, &actions::REPLACE)?;
        self.validate_new_ebook(&new_ebook)?;

        self.apply_patch(id, new_ebook.into()).await
    }

    /// Partial update: only the supplied fields change.
    #[instrument(skip(self, ctx, patch), fields(ebook_id = id))]
    pub async fn patch_ebook(
        &self,
        ctx: &SecurityContext,
        id: i64,
        patch: EbookPatch,
    ) -> Result<EbookFull, DomainError> {
        tracing::info!("Patching ebook");

        AdminOrReadOnly.check(ctx, &actions::PATCH)?;
        self.validate_patch(&patch)?;

        self.apply_patch(id, patch).await
    }

    /// Delete an ebook and every review attached to it in one transaction.
    #[instrument(skip(self, ctx), fields(ebook_id = id))]
    pub async fn delete_ebook(&self, ctx: &SecurityContext, id: i64) -> Result<(), DomainError> {
        tracing::info!("Deleting ebook");

        AdminOrReadOnly.check(ctx, &actions::DELETE)?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let removed_reviews = self.reviews.delete_for_ebook(&txn, id).await?;
        if !self.repo.delete(&txn, id).await? {
            // Dropping the transaction rolls it back.
            return Err(DomainError::ebook_not_found(id));
        }
        txn.commit().await.map_err(db_err)?;

        tracing::info!(removed_reviews, "Successfully deleted ebook");
        Ok(())
    }

    async fn apply_patch(&self, id: i64, patch: EbookPatch) -> Result<EbookFull, DomainError> {
        let mut current = self
            .repo
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::ebook_not_found(id))?;

        if let Some(title) = patch.title {
            current.title = title;
        }
        if let Some(author) = patch.author {
            current.author = author;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(publication_date) = patch.publication_date {
            current.publication_date = publication_date;
        }

        let ebook = self.repo.update(&self.db, current).await?;
        let reviews = self.reviews.list_for_ebooks(&self.db, &[id]).await?;

        tracing::info!("Successfully updated ebook");
        Ok(EbookFull { ebook, reviews })
    }

    fn validate_new_ebook(&self, new_ebook: &NewEbook) -> Result<(), DomainError> {
        self.validate_patch(&EbookPatch::from(new_ebook.clone()))
    }

    fn validate_patch(&self, patch: &EbookPatch) -> Result<(), DomainError> {
        if let Some(ref title) = patch.title {
            Self::validate_text("title", title, Some(self.config.max_title_length))?;
        }
        if let Some(ref author) = patch.author {
            Self::validate_text("author", author, Some(self.config.max_author_length))?;
        }
        if let Some(ref description) = patch.description {
            Self::validate_text("description", description, None)?;
        }
        Ok(())
    }

    fn validate_text(field: &str, value: &str, max: Option<usize>) -> Result<(), DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::validation(field, "This field may not be blank."));
        }
        if let Some(max) = max {
            let len = value.chars().count();
            if len > max {
                return Err(DomainError::validation(
                    field,
                    format!("Ensure this field has no more than {max} characters (got {len})."),
                ));
            }
        }
        Ok(())
    }
}
