use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "combustion_request_fuel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub request_id: i32,
    pub fuel_id: i32,
    pub fuel_volume: f64,
    pub intermediate_energy: Option<f64>,
    pub is_calculated: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::combustion_request::Entity",
        from = "Column::RequestId",
        to = "super::combustion_request::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CombustionRequest,
    #[sea_orm(
        belongs_to = "super::fuel::Entity",
        from = "Column::FuelId",
        to = "super::fuel::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Fuel,
}

impl Related<super::combustion_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CombustionRequest.def()
    }
}

impl Related<super::fuel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fuel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
