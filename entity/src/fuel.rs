use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    pub card_image: Option<String>,
    pub short_desc: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub full_desc: Option<String>,
    pub is_gas: bool,
    pub is_delete: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::combustion_request_fuel::Entity")]
    CombustionRequestFuel,
}

impl Related<super::combustion_request_fuel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CombustionRequestFuel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
