use async_trait::async_trait;
use ebooks_sdk::Review;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repos::{NewReviewRecord, ReviewsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::review::{ActiveModel as ReviewAM, Column, Entity as ReviewEntity};

/// ORM-based implementation of the `ReviewsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmReviewsRepository;

impl OrmReviewsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReviewsRepository for OrmReviewsRepository {
    async fn get<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Review>, DomainError> {
        let found = ReviewEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list_for_ebooks<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_ids: &[i64],
    ) -> Result<Vec<Review>, DomainError> {
        if ebook_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = ReviewEntity::find()
            .filter(Column::EbookId.is_in(ebook_ids.iter().copied()))
            .order_by_asc(Column::EbookId)
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_ebook_and_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
        author: Uuid,
    ) -> Result<Vec<Review>, DomainError> {
        let rows = ReviewEntity::find()
            .filter(Column::EbookId.eq(ebook_id))
            .filter(Column::ReviewAuthor.eq(author))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_for_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
        author: Uuid,
    ) -> Result<bool, DomainError> {
        let count = ReviewEntity::find()
            .filter(Column::EbookId.eq(ebook_id))
            .filter(Column::ReviewAuthor.eq(author))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        record: NewReviewRecord,
    ) -> Result<Review, DomainError> {
        let m = ReviewAM {
            id: NotSet,
            ebook_id: Set(record.ebook_id),
            review_author: Set(Some(record.review_author)),
            review_date: Set(record.created_at),
            review_updt: Set(record.created_at),
            review_text: Set(record.review_text),
            review_rating: Set(record.review_rating),
        };

        let inserted = m.insert(conn).await.map_err(db_err)?;
        Ok(inserted.into())
    }

    async fn update<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        review: Review,
    ) -> Result<Review, DomainError> {
        let id = review.id;
        // Ebook, author and creation date are never rewritten.
        let m = ReviewAM {
            id: Unchanged(id),
            ebook_id: NotSet,
            review_author: NotSet,
            review_date: NotSet,
            review_updt: Set(review.review_updt),
            review_text: Set(review.review_text),
            review_rating: Set(review.review_rating),
        };

        match m.update(conn).await {
            Ok(updated) => Ok(updated.into()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(DomainError::review_not_found(id)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<bool, DomainError> {
        let result = ReviewEntity::delete_by_id(id).exec(conn).await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_for_ebook<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook_id: i64,
    ) -> Result<u64, DomainError> {
        let result = ReviewEntity::delete_many()
            .filter(Column::EbookId.eq(ebook_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn detach_author<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        author: Uuid,
    ) -> Result<u64, DomainError> {
        let result = ReviewEntity::update_many()
            .col_expr(Column::ReviewAuthor, Expr::value(Option::<Uuid>::None))
            .filter(Column::ReviewAuthor.eq(author))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }
}
