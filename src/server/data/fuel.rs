//! Fuel catalog repository.
//!
//! Every read excludes soft-deleted fuels, so a deleted fuel behaves like a missing one.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::fuel::{CreateFuelParams, Fuel, UpdateFuelParams};

pub struct FuelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FuelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active fuels ordered by ID, optionally filtered by a case-insensitive title
    /// substring.
    ///
    /// The substring match runs in Rust so non-ASCII titles compare case-insensitively on
    /// every backend.
    pub async fn get_all(&self, title: Option<&str>) -> Result<Vec<Fuel>, DbErr> {
        let fuels = entity::prelude::Fuel::find()
            .filter(entity::fuel::Column::IsDelete.eq(false))
            .order_by_asc(entity::fuel::Column::Id)
            .all(self.db)
            .await?;

        let needle = title
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());

        Ok(fuels
            .into_iter()
            .filter(|fuel| match &needle {
                Some(needle) => fuel.title.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .map(Fuel::from_entity)
            .collect())
    }

    /// Gets an active fuel by ID.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Fuel>, DbErr> {
        Ok(self.find_active(id).await?.map(Fuel::from_entity))
    }

    /// Inserts a new catalog fuel without a card image.
    ///
    /// # Arguments
    /// - `params` - Title, physical properties and descriptions
    ///
    /// # Returns
    /// - `Ok(Fuel)` - Created fuel
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateFuelParams) -> Result<Fuel, DbErr> {
        let entity = entity::fuel::ActiveModel {
            title: ActiveValue::Set(params.title),
            heat: ActiveValue::Set(params.heat),
            molar_mass: ActiveValue::Set(params.molar_mass),
            density: ActiveValue::Set(params.density),
            card_image: ActiveValue::Set(None),
            short_desc: ActiveValue::Set(params.short_desc),
            full_desc: ActiveValue::Set(params.full_desc),
            is_gas: ActiveValue::Set(params.is_gas),
            is_delete: ActiveValue::Set(false),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Fuel::from_entity(entity))
    }

    /// Writes every provided field of an active fuel.
    ///
    /// # Returns
    /// - `Ok(Some(Fuel))` - Updated fuel, unchanged when no field was provided
    /// - `Ok(None)` - Fuel missing or soft-deleted
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, params: UpdateFuelParams) -> Result<Option<Fuel>, DbErr> {
        let Some(model) = self.find_active(params.id).await? else {
            return Ok(None);
        };

        let mut active: entity::fuel::ActiveModel = model.clone().into();
        let mut changed = false;

        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
            changed = true;
        }
        if let Some(heat) = params.heat {
            active.heat = ActiveValue::Set(heat);
            changed = true;
        }
        if let Some(molar_mass) = params.molar_mass {
            active.molar_mass = ActiveValue::Set(molar_mass);
            changed = true;
        }
        if let Some(density) = params.density {
            active.density = ActiveValue::Set(density);
            changed = true;
        }
        if let Some(short_desc) = params.short_desc {
            active.short_desc = ActiveValue::Set(Some(short_desc));
            changed = true;
        }
        if let Some(full_desc) = params.full_desc {
            active.full_desc = ActiveValue::Set(Some(full_desc));
            changed = true;
        }
        if let Some(is_gas) = params.is_gas {
            active.is_gas = ActiveValue::Set(is_gas);
            changed = true;
        }

        if !changed {
            return Ok(Some(Fuel::from_entity(model)));
        }

        let updated = active.update(self.db).await?;

        Ok(Some(Fuel::from_entity(updated)))
    }

    /// Replaces the image reference of an active fuel.
    ///
    /// # Returns
    /// - `Ok(Some(Fuel))` - Updated fuel
    /// - `Ok(None)` - Fuel missing or soft-deleted
    pub async fn set_card_image(
        &self,
        id: i32,
        card_image: Option<String>,
    ) -> Result<Option<Fuel>, DbErr> {
        let Some(model) = self.find_active(id).await? else {
            return Ok(None);
        };

        let mut active: entity::fuel::ActiveModel = model.into();
        active.card_image = ActiveValue::Set(card_image);
        let updated = active.update(self.db).await?;

        Ok(Some(Fuel::from_entity(updated)))
    }

    /// Marks an active fuel as deleted and clears its image reference.
    ///
    /// # Returns
    /// - `Ok(true)` - Fuel was active and is now deleted
    /// - `Ok(false)` - Fuel missing or already deleted
    pub async fn soft_delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Fuel::update_many()
            .col_expr(entity::fuel::Column::IsDelete, sea_orm::sea_query::Expr::value(true))
            .col_expr(
                entity::fuel::Column::CardImage,
                sea_orm::sea_query::Expr::value(Option::<String>::None),
            )
            .filter(entity::fuel::Column::Id.eq(id))
            .filter(entity::fuel::Column::IsDelete.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    async fn find_active(&self, id: i32) -> Result<Option<entity::fuel::Model>, DbErr> {
        entity::prelude::Fuel::find_by_id(id)
            .filter(entity::fuel::Column::IsDelete.eq(false))
            .one(self.db)
            .await
    }
}
