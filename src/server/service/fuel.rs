//! Fuel catalog management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::fuel::FuelRepository,
    error::AppError,
    model::fuel::{CreateFuelParams, Fuel, UpdateFuelParams},
    service::image::ImageStore,
};

pub struct FuelService<'a> {
    db: &'a DatabaseConnection,
    images: &'a dyn ImageStore,
}

impl<'a> FuelService<'a> {
    pub fn new(db: &'a DatabaseConnection, images: &'a dyn ImageStore) -> Self {
        Self { db, images }
    }

    /// Lists active fuels, optionally filtered by a case-insensitive title substring.
    pub async fn list(&self, title: Option<&str>) -> Result<Vec<Fuel>, AppError> {
        let title = title.map(str::trim).filter(|t| !t.is_empty());

        Ok(FuelRepository::new(self.db).get_all(title).await?)
    }

    /// Gets an active fuel; soft-deleted fuels are not found.
    pub async fn get(&self, id: i32) -> Result<Fuel, AppError> {
        FuelRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| fuel_not_found(id))
    }

    /// Adds a fuel to the catalog.
    ///
    /// # Returns
    /// - `Ok(Fuel)` - Created fuel
    /// - `Err(AppError::BadRequest)` - Empty title
    pub async fn create(&self, params: CreateFuelParams) -> Result<Fuel, AppError> {
        if params.title.is_empty() {
            return Err(AppError::BadRequest("Fuel title is required".to_string()));
        }

        let fuel = FuelRepository::new(self.db).create(params).await?;

        tracing::info!(fuel_id = fuel.id, "Created fuel {}", fuel.title);

        Ok(fuel)
    }

    /// Applies a partial update. Explicit zero and `false` values are written.
    ///
    /// # Arguments
    /// - `params` - Fuel ID plus the fields to change
    ///
    /// # Returns
    /// - `Ok(Fuel)` - Updated fuel
    /// - `Err(AppError::BadRequest)` - Title given but empty
    /// - `Err(AppError::NotFound)` - Fuel missing or soft-deleted
    pub async fn update(&self, params: UpdateFuelParams) -> Result<Fuel, AppError> {
        if params.title.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Fuel title cannot be empty".to_string()));
        }

        let id = params.id;
        FuelRepository::new(self.db)
            .update(params)
            .await?
            .ok_or_else(|| fuel_not_found(id))
    }

    /// Soft-deletes a fuel after removing its image.
    ///
    /// Image removal is best-effort; a failure is logged and the fuel is still deleted.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let fuel_repo = FuelRepository::new(self.db);

        let fuel = fuel_repo.get_by_id(id).await?.ok_or_else(|| fuel_not_found(id))?;

        if let Some(card_image) = &fuel.card_image {
            if let Err(e) = self.images.delete(card_image).await {
                tracing::warn!(fuel_id = id, "Failed to remove fuel image {}: {}", card_image, e);
            }
        }

        if !fuel_repo.soft_delete(id).await? {
            return Err(fuel_not_found(id));
        }

        tracing::info!(fuel_id = id, "Deleted fuel");

        Ok(())
    }

    /// Stores a new card image and points the fuel at it.
    ///
    /// The new object is removed again when the fuel cannot be updated. The previous image
    /// is removed best-effort once the fuel points at the new one.
    pub async fn upload_image(
        &self,
        id: i32,
        filename: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<Fuel, AppError> {
        let fuel_repo = FuelRepository::new(self.db);

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Image body is empty".to_string()));
        }

        let previous = fuel_repo.get_by_id(id).await?.ok_or_else(|| fuel_not_found(id))?;

        let name = format!("fuel_{}_{}", id, filename);
        let reference = self.images.put(&name, bytes, content_type).await?;

        let updated = match fuel_repo.set_card_image(id, Some(reference.clone())).await {
            Ok(Some(fuel)) => fuel,
            Ok(None) => {
                self.discard_image(id, &reference).await;
                return Err(fuel_not_found(id));
            }
            Err(e) => {
                self.discard_image(id, &reference).await;
                return Err(e.into());
            }
        };

        if let Some(old) = previous.card_image.filter(|old| *old != reference) {
            self.discard_image(id, &old).await;
        }

        Ok(updated)
    }

    async fn discard_image(&self, fuel_id: i32, reference: &str) {
        if let Err(e) = self.images.delete(reference).await {
            tracing::warn!(fuel_id, "Failed to remove fuel image {}: {}", reference, e);
        }
    }
}

fn fuel_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Fuel {} not found", id))
}
