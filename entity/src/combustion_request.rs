use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "combustion_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub finished_at: Option<DateTimeUtc>,
    pub creator_id: i32,
    pub moderator_id: Option<i32>,
    pub molar_volume: Option<f64>,
    pub final_result: Option<f64>,
    pub calculation_token: Option<String>,
    pub calculation_status: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ModeratorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Moderator,
    #[sea_orm(has_many = "super::combustion_request_fuel::Entity")]
    CombustionRequestFuel,
}

impl Related<super::combustion_request_fuel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CombustionRequestFuel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
