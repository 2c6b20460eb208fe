use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chemicals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Chemicals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Chemicals::Cas)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Chemicals::ChemicalName).string().null())
                    .col(ColumnDef::new(Chemicals::Mw).string_len(64).null())
                    .col(ColumnDef::new(Chemicals::Mp).string_len(64).null())
                    .col(ColumnDef::new(Chemicals::Bp).string_len(64).null())
                    .col(ColumnDef::new(Chemicals::Density).string_len(64).null())
                    .col(ColumnDef::new(Chemicals::Smile).text().null())
                    .col(ColumnDef::new(Chemicals::Inchi).text().null())
                    .to_owned(),
            )
            .await?;

        // 结构精确查询
        manager
            .create_index(
                Index::create()
                    .name("idx_chemicals_inchi")
                    .table(Chemicals::Table)
                    .col(Chemicals::Inchi)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Chemicals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Chemicals {
    Table,
    Id,
    Cas,
    ChemicalName,
    Mw,
    Mp,
    Bp,
    Density,
    Smile,
    Inchi,
}
