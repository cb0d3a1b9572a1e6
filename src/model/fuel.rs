use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FuelDto {
    pub id: i32,
    pub title: String,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    pub card_image: Option<String>,
    pub short_desc: Option<String>,
    pub full_desc: Option<String>,
    pub is_gas: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFuelDto {
    pub title: String,
    pub heat: f64,
    pub molar_mass: f64,
    pub density: f64,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub full_desc: Option<String>,
    #[serde(default)]
    pub is_gas: bool,
}

/// Partial fuel update. Absent fields are left unchanged; present fields are written even
/// when they are zero or `false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFuelDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub heat: Option<f64>,
    #[serde(default)]
    pub molar_mass: Option<f64>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub short_desc: Option<String>,
    #[serde(default)]
    pub full_desc: Option<String>,
    #[serde(default)]
    pub is_gas: Option<bool>,
}
