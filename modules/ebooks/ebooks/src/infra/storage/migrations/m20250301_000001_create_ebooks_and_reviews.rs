use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Ebooks {
    Table,
    Id,
    Title,
    Author,
    Description,
    PublicationDate,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    EbookId,
    ReviewAuthor,
    ReviewDate,
    ReviewUpdt,
    ReviewText,
    ReviewRating,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ebooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ebooks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ebooks::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Ebooks::Author).string_len(100).not_null())
                    .col(ColumnDef::new(Ebooks::Description).text().not_null())
                    .col(ColumnDef::new(Ebooks::PublicationDate).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::EbookId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::ReviewAuthor).uuid().null())
                    .col(
                        ColumnDef::new(Reviews::ReviewDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reviews::ReviewUpdt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reviews::ReviewText).text().not_null())
                    .col(ColumnDef::new(Reviews::ReviewRating).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_ebook")
                            .from(Reviews::Table, Reviews::EbookId)
                            .to(Ebooks::Table, Ebooks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL authors never collide, so detached reviews may pile up per ebook.
        manager
            .create_index(
                Index::create()
                    .name("ux_reviews_ebook_author")
                    .table(Reviews::Table)
                    .col(Reviews::EbookId)
                    .col(Reviews::ReviewAuthor)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_author")
                    .table(Reviews::Table)
                    .col(Reviews::ReviewAuthor)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Ebooks::Table).to_owned())
            .await
    }
}
