//! Fuel catalog domain models and parameters.

use crate::model::fuel::{CreateFuelDto, FuelDto, UpdateFuelDto};

/// A catalog fuel. Soft-deleted fuels never leave the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Fuel {
    pub id: i32,
    pub title: String,
    /// Heat of combustion.
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    /// Reference returned by the image store.
    pub card_image: Option<String>,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub is_gas: bool,
}

impl Fuel {
    /// Converts an entity model to a fuel domain model at the repository boundary.
    pub fn from_entity(entity: entity::fuel::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            heat: entity.heat,
            molar_mass: entity.molar_mass,
            density: entity.density,
            card_image: entity.card_image,
            short_desc: entity.short_desc,
            full_desc: entity.full_desc,
            is_gas: entity.is_gas,
        }
    }

    pub fn into_dto(self) -> FuelDto {
        FuelDto {
            id: self.id,
            title: self.title,
            heat: self.heat,
            molar_mass: self.molar_mass,
            density: self.density,
            card_image: self.card_image,
            short_desc: self.short_desc,
            full_desc: self.full_desc,
            is_gas: self.is_gas,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFuelParams {
    pub title: String,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub is_gas: bool,
}

impl CreateFuelParams {
    pub fn from_dto(dto: CreateFuelDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            heat: dto.heat,
            molar_mass: dto.molar_mass,
            density: dto.density,
            short_desc: dto.short_desc,
            full_desc: dto.full_desc,
            is_gas: dto.is_gas,
        }
    }
}

/// Partial fuel update.
///
/// `None` leaves the stored value untouched, `Some` writes it even when it is `0.0` or
/// `false`.
#[derive(Debug, Clone, Default)]
pub struct UpdateFuelParams {
    pub id: i32,
    pub title: Option<String>,
    pub heat: Option<f64>,
    pub molar_mass: Option<f64>,
    pub density: Option<f64>,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub is_gas: Option<bool>,
}

impl UpdateFuelParams {
    pub fn from_dto(id: i32, dto: UpdateFuelDto) -> Self {
        Self {
            id,
            title: dto.title.map(|title| title.trim().to_string()),
            heat: dto.heat,
            molar_mass: dto.molar_mass,
            density: dto.density,
            short_desc: dto.short_desc,
            full_desc: dto.full_desc,
            is_gas: dto.is_gas,
        }
    }
}
