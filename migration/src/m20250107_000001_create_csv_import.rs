use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CsvImport::Table)
                    .if_not_exists()
                    .col(pk_auto(CsvImport::Id))
                    .col(string(CsvImport::Source))
                    .col(string_len_uniq(CsvImport::Sha256, 64))
                    .col(big_integer(CsvImport::RowCount))
                    .col(timestamp_with_time_zone(CsvImport::ImportedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CsvImport::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CsvImport {
    Table,
    Id,
    Source,
    Sha256,
    RowCount,
    ImportedAt,
}
