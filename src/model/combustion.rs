use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::fuel::FuelDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombustionRequestDto {
    pub id: i32,
    /// One of `draft`, `submitted`, `completed`, `rejected`, `deleted`.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub creator_id: i32,
    pub moderator_id: Option<i32>,
    pub molar_volume: Option<f64>,
    pub final_result: Option<f64>,
    /// `processing` while a calculation session runs.
    pub calculation_status: Option<String>,
}

/// A fuel inside a request together with the per-link data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombustionFuelDto {
    pub fuel: FuelDto,
    pub fuel_volume: f64,
    pub intermediate_energy: Option<f64>,
    pub is_calculated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CombustionRequestDetailDto {
    pub request: CombustionRequestDto,
    pub fuels: Vec<CombustionFuelDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartDto {
    /// Draft id, `0` when the caller has no draft or is a guest.
    pub request_id: i32,
    pub item_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateMolarVolumeDto {
    pub molar_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateFuelVolumeDto {
    pub fuel_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModerateDto {
    /// `true` completes the request, `false` rejects it.
    pub approve: bool,
}
