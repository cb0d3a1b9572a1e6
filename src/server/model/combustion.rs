//! Combustion request domain models, lifecycle states and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::combustion::{
        CartDto, CombustionFuelDto, CombustionRequestDetailDto, CombustionRequestDto,
    },
    server::model::fuel::Fuel,
};

/// Molar volume of an ideal gas at standard conditions, in litres per mole.
pub const DEFAULT_MOLAR_VOLUME: f64 = 22.414;

/// Lifecycle state of a combustion request.
///
/// `draft → submitted → completed | rejected`, with `deleted` reachable from `draft` and
/// `submitted`. `completed`, `rejected` and `deleted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Draft,
    Submitted,
    Completed,
    Rejected,
    Deleted,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Draft => "draft",
            RequestStatus::Submitted => "submitted",
            RequestStatus::Completed => "completed",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Deleted => "deleted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Completed | RequestStatus::Rejected | RequestStatus::Deleted
        )
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(RequestStatus::Draft),
            "submitted" => Ok(RequestStatus::Submitted),
            "completed" => Ok(RequestStatus::Completed),
            "rejected" => Ok(RequestStatus::Rejected),
            "deleted" => Ok(RequestStatus::Deleted),
            other => Err(format!("Unknown request status '{}'", other)),
        }
    }
}

/// Marker stored on a request while and after a calculation session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationStatus {
    Processing,
    Completed,
}

impl CalculationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationStatus::Processing => "processing",
            CalculationStatus::Completed => "completed",
        }
    }
}

/// A combustion request without its fuels.
///
/// The session token never leaves the data and service layers, so it is not part of this
/// model.
#[derive(Debug, Clone, PartialEq)]
pub struct CombustionRequest {
    pub id: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub creator_id: i32,
    pub moderator_id: Option<i32>,
    pub molar_volume: Option<f64>,
    pub final_result: Option<f64>,
    pub calculation_status: Option<String>,
}

impl CombustionRequest {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CombustionRequest)` - Converted domain model
    /// - `Err(DbErr::Custom)` - Stored status is not a known lifecycle state
    pub fn from_entity(entity: entity::combustion_request::Model) -> Result<Self, DbErr> {
        let status = entity.status.parse::<RequestStatus>().map_err(DbErr::Custom)?;

        Ok(Self {
            id: entity.id,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            finished_at: entity.finished_at,
            creator_id: entity.creator_id,
            moderator_id: entity.moderator_id,
            molar_volume: entity.molar_volume,
            final_result: entity.final_result,
            calculation_status: entity.calculation_status,
        })
    }

    pub fn into_dto(self) -> CombustionRequestDto {
        CombustionRequestDto {
            id: self.id,
            status: self.status.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            finished_at: self.finished_at,
            creator_id: self.creator_id,
            moderator_id: self.moderator_id,
            molar_volume: self.molar_volume,
            final_result: self.final_result,
            calculation_status: self.calculation_status,
        }
    }
}

/// A fuel inside a request with its link data.
#[derive(Debug, Clone, PartialEq)]
pub struct CombustionFuel {
    pub fuel: Fuel,
    pub fuel_volume: f64,
    pub intermediate_energy: Option<f64>,
    pub is_calculated: bool,
}

impl CombustionFuel {
    pub fn from_entity(
        link: entity::combustion_request_fuel::Model,
        fuel: entity::fuel::Model,
    ) -> Self {
        Self {
            fuel: Fuel::from_entity(fuel),
            fuel_volume: link.fuel_volume,
            intermediate_energy: link.intermediate_energy,
            is_calculated: link.is_calculated,
        }
    }

    pub fn into_dto(self) -> CombustionFuelDto {
        CombustionFuelDto {
            fuel: self.fuel.into_dto(),
            fuel_volume: self.fuel_volume,
            intermediate_energy: self.intermediate_energy,
            is_calculated: self.is_calculated,
        }
    }
}

/// A request with every linked fuel.
#[derive(Debug, Clone, PartialEq)]
pub struct CombustionRequestDetail {
    pub request: CombustionRequest,
    pub fuels: Vec<CombustionFuel>,
}

impl CombustionRequestDetail {
    pub fn into_dto(self) -> CombustionRequestDetailDto {
        CombustionRequestDetailDto {
            request: self.request.into_dto(),
            fuels: self.fuels.into_iter().map(CombustionFuel::into_dto).collect(),
        }
    }
}

/// Summary of a caller's draft for the cart icon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cart {
    pub request_id: Option<i32>,
    pub item_count: u64,
}

impl Cart {
    pub fn into_dto(self) -> CartDto {
        CartDto {
            request_id: self.request_id.unwrap_or(0),
            item_count: self.item_count,
        }
    }
}

/// Filter for listing requests.
///
/// Without a status, `draft` and `deleted` requests are excluded.
#[derive(Debug, Clone, Default)]
pub struct CombustionFilter {
    /// Restricts results to one creator; `None` lists every creator's requests.
    pub creator_id: Option<i32>,
    pub status: Option<RequestStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
