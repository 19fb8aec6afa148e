use async_trait::async_trait;
use ebooks_sdk::{Ebook, NewEbook};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set, Unchanged,
};

use crate::domain::error::DomainError;
use crate::domain::repos::EbooksRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::ebook::{
    ActiveModel as EbookAM, Column, Entity as EbookEntity,
};

/// ORM-based implementation of the `EbooksRepository` trait.
#[derive(Clone, Default)]
pub struct OrmEbooksRepository;

impl OrmEbooksRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EbooksRepository for OrmEbooksRepository {
    async fn list<C: ConnectionTrait + Sync>(&self, conn: &C) -> Result<Vec<Ebook>, DomainError> {
        let rows = EbookEntity::find()
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<Ebook>, DomainError> {
        let found = EbookEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        new_ebook: NewEbook,
    ) -> Result<Ebook, DomainError> {
        let m = EbookAM {
            id: NotSet,
            title: Set(new_ebook.title),
            author: Set(new_ebook.author),
            description: Set(new_ebook.description),
            publication_date: Set(new_ebook.publication_date),
        };

        let inserted = m.insert(conn).await.map_err(db_err)?;
        Ok(inserted.into())
    }

    async fn update<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        ebook: Ebook,
    ) -> Result<Ebook, DomainError> {
        let id = ebook.id;
        let m = EbookAM {
            id: Unchanged(id),
            title: Set(ebook.title),
            author: Set(ebook.author),
            description: Set(ebook.description),
            publication_date: Set(ebook.publication_date),
        };

        match m.update(conn).await {
            Ok(updated) => Ok(updated.into()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(DomainError::ebook_not_found(id)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete<C: ConnectionTrait + Sync>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<bool, DomainError> {
        let result = EbookEntity::delete_by_id(id).exec(conn).await.map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
