//! Request-fuel link factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating links between a combustion request and a fuel.
pub struct LinkFactory<'a> {
    db: &'a DatabaseConnection,
    request_id: i32,
    fuel_id: i32,
    fuel_volume: f64,
    intermediate_energy: Option<f64>,
}

impl<'a> LinkFactory<'a> {
    /// Creates a new uncalculated link with a fuel volume of `1.0`.
    pub fn new(db: &'a DatabaseConnection, request_id: i32, fuel_id: i32) -> Self {
        Self {
            db,
            request_id,
            fuel_id,
            fuel_volume: 1.0,
            intermediate_energy: None,
        }
    }

    pub fn fuel_volume(mut self, fuel_volume: f64) -> Self {
        self.fuel_volume = fuel_volume;
        self
    }

    /// Marks the link as already calculated with the given energy.
    pub fn calculated(mut self, energy: f64) -> Self {
        self.intermediate_energy = Some(energy);
        self
    }

    /// Builds and inserts the link entity into the database.
    pub async fn build(self) -> Result<entity::combustion_request_fuel::Model, DbErr> {
        entity::combustion_request_fuel::ActiveModel {
            id: ActiveValue::NotSet,
            request_id: ActiveValue::Set(self.request_id),
            fuel_id: ActiveValue::Set(self.fuel_id),
            fuel_volume: ActiveValue::Set(self.fuel_volume),
            is_calculated: ActiveValue::Set(self.intermediate_energy.is_some()),
            intermediate_energy: ActiveValue::Set(self.intermediate_energy),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an uncalculated link with default volume.
pub async fn create_link(
    db: &DatabaseConnection,
    request_id: i32,
    fuel_id: i32,
) -> Result<entity::combustion_request_fuel::Model, DbErr> {
    LinkFactory::new(db, request_id, fuel_id).build().await
}
