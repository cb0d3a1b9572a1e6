use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::combustion::CombustionRequestDto;

/// Returned when a calculation session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationSessionDto {
    pub request_id: i32,
    pub fuel_count: usize,
    pub molar_volume: f64,
    pub token: String,
    pub callback_url: String,
}

/// Result posted back by the calculator for one fuel.
///
/// Every field is optional on the wire so missing values are reported as validation
/// errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CalculationResultDto {
    #[serde(default, alias = "combustion_id")]
    pub request_id: Option<i32>,
    #[serde(default)]
    pub fuel_id: Option<i32>,
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalculationProgressDto {
    pub request: CombustionRequestDto,
    pub calculated_count: u64,
    pub total_count: u64,
}
