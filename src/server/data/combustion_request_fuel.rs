//! Request-fuel link repository.
//!
//! A link carries the fuel volume chosen by the buyer and, once the calculator has answered,
//! the partial energy for that fuel.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{calculation::CalculationInput, combustion::CombustionFuel};

use entity::combustion_request_fuel::Column;

pub struct CombustionRequestFuelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CombustionRequestFuelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Whether the fuel is already linked to the request.
    pub async fn exists(&self, request_id: i32, fuel_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::CombustionRequestFuel::find()
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::FuelId.eq(fuel_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Links a fuel to a request with no result yet.
    ///
    /// # Arguments
    /// - `request_id` - Owning request
    /// - `fuel_id` - Catalog fuel
    /// - `fuel_volume` - Buyer-supplied volume, already validated as positive
    ///
    /// # Returns
    /// - `Ok(Model)` - Created link
    /// - `Err(DbErr)` - Insert failed, including a duplicate `(request_id, fuel_id)`
    pub async fn create(
        &self,
        request_id: i32,
        fuel_id: i32,
        fuel_volume: f64,
    ) -> Result<entity::combustion_request_fuel::Model, DbErr> {
        entity::combustion_request_fuel::ActiveModel {
            request_id: ActiveValue::Set(request_id),
            fuel_id: ActiveValue::Set(fuel_id),
            fuel_volume: ActiveValue::Set(fuel_volume),
            intermediate_energy: ActiveValue::Set(None),
            is_calculated: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Changes the volume of a link.
    ///
    /// # Returns
    /// - `Ok(true)` - Link existed and was updated
    /// - `Ok(false)` - No such link
    pub async fn update_volume(
        &self,
        request_id: i32,
        fuel_id: i32,
        fuel_volume: f64,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequestFuel::update_many()
            .col_expr(Column::FuelVolume, Expr::value(fuel_volume))
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::FuelId.eq(fuel_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes a link.
    ///
    /// # Returns
    /// - `Ok(true)` - Link existed and was removed
    /// - `Ok(false)` - No such link
    pub async fn delete(&self, request_id: i32, fuel_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequestFuel::delete_many()
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::FuelId.eq(fuel_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Counts every link of a request.
    pub async fn count_by_request(&self, request_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CombustionRequestFuel::find()
            .filter(Column::RequestId.eq(request_id))
            .count(self.db)
            .await
    }

    /// Counts links of a request that already hold a partial energy.
    pub async fn count_calculated(&self, request_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CombustionRequestFuel::find()
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::IsCalculated.eq(true))
            .count(self.db)
            .await
    }

    /// Gets every fuel of a request with its link data, in insertion order.
    ///
    /// Soft-deleted fuels stay visible here: a request keeps the fuels it was built from.
    pub async fn get_fuels(&self, request_id: i32) -> Result<Vec<CombustionFuel>, DbErr> {
        let rows = self.find_with_fuels(request_id).await?;

        Ok(rows
            .into_iter()
            .map(|(link, fuel)| CombustionFuel::from_entity(link, fuel))
            .collect())
    }

    /// Gets the calculator input for every link of a request.
    pub async fn get_calculation_inputs(
        &self,
        request_id: i32,
    ) -> Result<Vec<CalculationInput>, DbErr> {
        let rows = self.find_with_fuels(request_id).await?;

        Ok(rows
            .into_iter()
            .map(|(link, fuel)| CalculationInput::from_entity(link, fuel))
            .collect())
    }

    /// Clears partial results before a new calculation session.
    pub async fn reset_results(&self, request_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::CombustionRequestFuel::update_many()
            .col_expr(Column::IntermediateEnergy, Expr::value(Option::<f64>::None))
            .col_expr(Column::IsCalculated, Expr::value(false))
            .filter(Column::RequestId.eq(request_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Stores the partial energy of a link that has no result yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Result written
    /// - `Ok(false)` - No such link, or the link already had a result
    pub async fn record_result(
        &self,
        request_id: i32,
        fuel_id: i32,
        energy: f64,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::CombustionRequestFuel::update_many()
            .col_expr(Column::IntermediateEnergy, Expr::value(Some(energy)))
            .col_expr(Column::IsCalculated, Expr::value(true))
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::FuelId.eq(fuel_id))
            .filter(Column::IsCalculated.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sums the stored partial energies of a request.
    pub async fn sum_energy(&self, request_id: i32) -> Result<f64, DbErr> {
        let links = entity::prelude::CombustionRequestFuel::find()
            .filter(Column::RequestId.eq(request_id))
            .filter(Column::IsCalculated.eq(true))
            .all(self.db)
            .await?;

        Ok(links
            .iter()
            .filter_map(|link| link.intermediate_energy)
            .sum())
    }

    async fn find_with_fuels(
        &self,
        request_id: i32,
    ) -> Result<Vec<(entity::combustion_request_fuel::Model, entity::fuel::Model)>, DbErr> {
        let rows = entity::prelude::CombustionRequestFuel::find()
            .filter(Column::RequestId.eq(request_id))
            .find_also_related(entity::prelude::Fuel)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, fuel)| fuel.map(|fuel| (link, fuel)))
            .collect())
    }
}
