use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250901_000002_create_fuel_table::Fuel,
    m20250901_000003_create_combustion_request_table::CombustionRequest,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CombustionRequestFuel::Table)
                    .if_not_exists()
                    .col(pk_auto(CombustionRequestFuel::Id))
                    .col(integer(CombustionRequestFuel::RequestId))
                    .col(integer(CombustionRequestFuel::FuelId))
                    .col(double(CombustionRequestFuel::FuelVolume))
                    .col(double_null(CombustionRequestFuel::IntermediateEnergy))
                    .col(boolean(CombustionRequestFuel::IsCalculated).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_combustion_request_fuel_request_id")
                            .from(
                                CombustionRequestFuel::Table,
                                CombustionRequestFuel::RequestId,
                            )
                            .to(CombustionRequest::Table, CombustionRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_combustion_request_fuel_fuel_id")
                            .from(CombustionRequestFuel::Table, CombustionRequestFuel::FuelId)
                            .to(Fuel::Table, Fuel::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_combustion_request_fuel_unique")
                    .table(CombustionRequestFuel::Table)
                    .col(CombustionRequestFuel::RequestId)
                    .col(CombustionRequestFuel::FuelId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CombustionRequestFuel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CombustionRequestFuel {
    Table,
    Id,
    RequestId,
    FuelId,
    FuelVolume,
    IntermediateEnergy,
    IsCalculated,
}
