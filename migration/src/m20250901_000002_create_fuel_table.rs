use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fuel::Table)
                    .if_not_exists()
                    .col(pk_auto(Fuel::Id))
                    .col(string(Fuel::Title))
                    .col(double(Fuel::Heat))
                    .col(double(Fuel::MolarMass))
                    .col(double(Fuel::Density))
                    .col(string_null(Fuel::CardImage))
                    .col(string_null(Fuel::ShortDesc))
                    .col(text_null(Fuel::FullDesc))
                    .col(boolean(Fuel::IsGas).default(false))
                    .col(boolean(Fuel::IsDelete).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fuel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Fuel {
    Table,
    Id,
    Title,
    Heat,
    MolarMass,
    Density,
    CardImage,
    ShortDesc,
    FullDesc,
    IsGas,
    IsDelete,
}
