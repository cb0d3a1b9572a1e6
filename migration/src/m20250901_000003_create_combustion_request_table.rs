use sea_orm_migration::{prelude::*, schema::*};

use super::m20250901_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CombustionRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(CombustionRequest::Id))
                    .col(string(CombustionRequest::Status).default("draft"))
                    .col(
                        timestamp_with_time_zone(CombustionRequest::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(CombustionRequest::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(
                        CombustionRequest::FinishedAt,
                    ))
                    .col(integer(CombustionRequest::CreatorId))
                    .col(integer_null(CombustionRequest::ModeratorId))
                    .col(double_null(CombustionRequest::MolarVolume))
                    .col(double_null(CombustionRequest::FinalResult))
                    .col(string_null(CombustionRequest::CalculationToken))
                    .col(string_null(CombustionRequest::CalculationStatus))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_combustion_request_creator_id")
                            .from(CombustionRequest::Table, CombustionRequest::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_combustion_request_moderator_id")
                            .from(CombustionRequest::Table, CombustionRequest::ModeratorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CombustionRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CombustionRequest {
    Table,
    Id,
    Status,
    CreatedAt,
    UpdatedAt,
    FinishedAt,
    CreatorId,
    ModeratorId,
    MolarVolume,
    FinalResult,
    CalculationToken,
    CalculationStatus,
}
