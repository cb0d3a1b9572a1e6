//! Calculation session models and the job payload sent to the calculator.

use serde::Serialize;

use crate::{
    model::calculation::{CalculationProgressDto, CalculationResultDto, CalculationSessionDto},
    server::{error::AppError, model::combustion::CombustionRequest},
};

/// One unit of work posted to the external calculator.
///
/// Field names follow the calculator's wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationJob {
    pub combustion_id: i32,
    pub fuel_id: i32,
    pub fuel_volume: f64,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    pub is_gas: bool,
    pub molar_volume: f64,
    pub callback_url: String,
}

/// A linked fuel with everything the calculator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub fuel_id: i32,
    pub fuel_volume: f64,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    pub is_gas: bool,
}

impl CalculationInput {
    pub fn from_entity(
        link: entity::combustion_request_fuel::Model,
        fuel: entity::fuel::Model,
    ) -> Self {
        Self {
            fuel_id: link.fuel_id,
            fuel_volume: link.fuel_volume,
            heat: fuel.heat,
            molar_mass: fuel.molar_mass,
            density: fuel.density,
            is_gas: fuel.is_gas,
        }
    }

    pub fn into_job(self, request_id: i32, molar_volume: f64, callback_url: &str) -> CalculationJob {
        CalculationJob {
            combustion_id: request_id,
            fuel_id: self.fuel_id,
            fuel_volume: self.fuel_volume,
            heat: self.heat,
            molar_mass: self.molar_mass,
            density: self.density,
            is_gas: self.is_gas,
            molar_volume,
            callback_url: callback_url.to_string(),
        }
    }
}

/// Outcome of starting a calculation session.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationSession {
    pub request_id: i32,
    pub fuel_count: usize,
    pub molar_volume: f64,
    pub token: String,
    pub callback_url: String,
}

impl CalculationSession {
    pub fn into_dto(self) -> CalculationSessionDto {
        CalculationSessionDto {
            request_id: self.request_id,
            fuel_count: self.fuel_count,
            molar_volume: self.molar_volume,
            token: self.token,
            callback_url: self.callback_url,
        }
    }
}

/// A validated calculation result.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResultParams {
    pub request_id: i32,
    pub fuel_id: i32,
    pub result: f64,
    pub token: String,
}

impl CalculationResultParams {
    /// Validates a posted result.
    ///
    /// # Returns
    /// - `Ok(CalculationResultParams)` - Every field present and well-formed
    /// - `Err(AppError::BadRequest)` - Missing id, non-positive id, non-finite result or
    ///   empty token
    pub fn from_dto(dto: CalculationResultDto) -> Result<Self, AppError> {
        let request_id = dto
            .request_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::BadRequest("combustion_id is required".to_string()))?;
        let fuel_id = dto
            .fuel_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::BadRequest("fuel_id is required".to_string()))?;
        let result = dto
            .result
            .filter(|result| result.is_finite())
            .ok_or_else(|| AppError::BadRequest("result must be a finite number".to_string()))?;
        let token = dto
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::BadRequest("token is required".to_string()))?;

        Ok(Self {
            request_id,
            fuel_id,
            result,
            token,
        })
    }
}

/// Request state plus how many of its links have a result.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationProgress {
    pub request: CombustionRequest,
    pub calculated_count: u64,
    pub total_count: u64,
}

impl CalculationProgress {
    /// Every link has a result and there is at least one link.
    pub fn is_complete(&self) -> bool {
        self.total_count > 0 && self.calculated_count >= self.total_count
    }

    pub fn into_dto(self) -> CalculationProgressDto {
        CalculationProgressDto {
            request: self.request.into_dto(),
            calculated_count: self.calculated_count,
            total_count: self.total_count,
        }
    }
}
