//! Fuel factory for creating catalog entries.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test fuels with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::fuel::FuelFactory;
///
/// let fuel = FuelFactory::new(&db)
///     .title("Methane")
///     .heat(890.0)
///     .gas(true)
///     .build()
///     .await?;
/// ```
pub struct FuelFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    heat: f64,
    molar_mass: f64,
    density: f64,
    card_image: Option<String>,
    short_desc: Option<String>,
    is_gas: bool,
    is_delete: bool,
}

impl<'a> FuelFactory<'a> {
    /// Creates a new FuelFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Fuel {id}"` where id is auto-incremented
    /// - heat, molar_mass, density: `1.0`
    /// - no image, no descriptions, liquid, not deleted
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Fuel {}", id),
            heat: 1.0,
            molar_mass: 1.0,
            density: 1.0,
            card_image: None,
            short_desc: None,
            is_gas: false,
            is_delete: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn heat(mut self, heat: f64) -> Self {
        self.heat = heat;
        self
    }

    pub fn molar_mass(mut self, molar_mass: f64) -> Self {
        self.molar_mass = molar_mass;
        self
    }

    pub fn density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn card_image(mut self, card_image: impl Into<String>) -> Self {
        self.card_image = Some(card_image.into());
        self
    }

    pub fn short_desc(mut self, short_desc: impl Into<String>) -> Self {
        self.short_desc = Some(short_desc.into());
        self
    }

    pub fn gas(mut self, is_gas: bool) -> Self {
        self.is_gas = is_gas;
        self
    }

    /// Marks the fuel as soft-deleted.
    pub fn deleted(mut self, is_delete: bool) -> Self {
        self.is_delete = is_delete;
        self
    }

    /// Builds and inserts the fuel entity into the database.
    pub async fn build(self) -> Result<entity::fuel::Model, DbErr> {
        entity::fuel::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(self.title),
            heat: ActiveValue::Set(self.heat),
            molar_mass: ActiveValue::Set(self.molar_mass),
            density: ActiveValue::Set(self.density),
            card_image: ActiveValue::Set(self.card_image),
            short_desc: ActiveValue::Set(self.short_desc),
            full_desc: ActiveValue::Set(None),
            is_gas: ActiveValue::Set(self.is_gas),
            is_delete: ActiveValue::Set(self.is_delete),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fuel with default values.
pub async fn create_fuel(db: &DatabaseConnection) -> Result<entity::fuel::Model, DbErr> {
    FuelFactory::new(db).build().await
}
