use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ebook_id: i64,
    /// Unique together with `ebook_id`; `NULL` once the author is detached.
    pub review_author: Option<Uuid>,
    pub review_date: OffsetDateTime,
    pub review_updt: OffsetDateTime,
    #[sea_orm(column_type = "Text")]
    pub review_text: String,
    pub review_rating: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ebook::Entity",
        from = "Column::EbookId",
        to = "super::ebook::Column::Id",
        on_delete = "Cascade"
    )]
    Ebook,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::ebook::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ebook.def()
    }
}

impl From<Model> for ebooks_sdk::Review {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            ebook_id: m.ebook_id,
            review_author: m.review_author,
            review_date: m.review_date,
            review_updt: m.review_updt,
            review_text: m.review_text,
            review_rating: m.review_rating,
        }
    }
}
