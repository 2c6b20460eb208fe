use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Locations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Locations::LocationName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Locations::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_locations_user_id")
                            .from(Locations::Table, Locations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一用户下位置名称唯一
        manager
            .create_index(
                Index::create()
                    .name("idx_locations_unique_name_user")
                    .table(Locations::Table)
                    .col(Locations::LocationName)
                    .col(Locations::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    LocationName,
    UserId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
