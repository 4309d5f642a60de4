use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // pk_auto emits AUTOINCREMENT on SQLite, so deleted ids are never handed out again.
        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(integer_null(Movie::Year))
                    .col(string_len(Movie::Title, 200))
                    .col(string_len(Movie::OriginEthnicity, 200))
                    .col(text_null(Movie::Directors))
                    .col(text_null(Movie::Cast))
                    .col(string_len(Movie::Genre, 200))
                    .col(string_len(Movie::WikiUrl, 200))
                    .col(text_null(Movie::Plot))
                    .col(timestamp_with_time_zone(Movie::DateCreated))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_year")
                    .table(Movie::Table)
                    .col(Movie::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Year,
    Title,
    OriginEthnicity,
    Directors,
    Cast,
    Genre,
    WikiUrl,
    Plot,
    DateCreated,
}
