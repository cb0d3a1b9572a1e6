//! Combustion request lifecycle: the buyer's draft, submission, moderation and deletion.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        combustion_request::CombustionRequestRepository,
        combustion_request_fuel::CombustionRequestFuelRepository, fuel::FuelRepository,
    },
    error::{auth::AuthError, AppError},
    model::combustion::{
        Cart, CombustionFilter, CombustionRequest, CombustionRequestDetail, RequestStatus,
    },
};

pub struct CombustionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CombustionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a fuel to the user's draft, creating the draft on first use.
    ///
    /// # Returns
    /// - `Ok(CombustionRequestDetail)` - Draft with the new fuel
    /// - `Err(AppError::NotFound)` - Fuel missing or soft-deleted
    /// - `Err(AppError::BadRequest)` - Non-positive volume, or the fuel is already in the draft
    pub async fn add_fuel_to_draft(
        &self,
        user_id: i32,
        fuel_id: i32,
        fuel_volume: f64,
    ) -> Result<CombustionRequestDetail, AppError> {
        let request_repo = CombustionRequestRepository::new(self.db);
        let link_repo = CombustionRequestFuelRepository::new(self.db);

        validate_positive("Fuel volume", fuel_volume)?;

        if FuelRepository::new(self.db).get_by_id(fuel_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Fuel {} not found", fuel_id)));
        }

        let draft = match request_repo.find_draft(user_id).await? {
            Some(draft) => draft,
            None => {
                let draft = request_repo.create_draft(user_id).await?;
                tracing::debug!(user_id, request_id = draft.id, "Created draft request");
                draft
            }
        };

        if link_repo.exists(draft.id, fuel_id).await? {
            return Err(AppError::BadRequest(format!(
                "Fuel {} is already in request {}",
                fuel_id, draft.id
            )));
        }
        link_repo.create(draft.id, fuel_id, fuel_volume).await?;

        self.detail(draft).await
    }

    /// Draft id and fuel count for the cart icon. Guests get an empty cart.
    pub async fn cart(&self, user_id: Option<i32>) -> Result<Cart, AppError> {
        let Some(user_id) = user_id else {
            return Ok(Cart::default());
        };

        let Some(draft) = CombustionRequestRepository::new(self.db)
            .find_draft(user_id)
            .await?
        else {
            return Ok(Cart::default());
        };

        let item_count = CombustionRequestFuelRepository::new(self.db)
            .count_by_request(draft.id)
            .await?;

        Ok(Cart {
            request_id: Some(draft.id),
            item_count,
        })
    }

    /// Lists requests. Moderators see every creator's requests, buyers only their own.
    pub async fn list(
        &self,
        user_id: i32,
        is_moderator: bool,
        mut filter: CombustionFilter,
    ) -> Result<Vec<CombustionRequest>, AppError> {
        filter.creator_id = (!is_moderator).then_some(user_id);

        Ok(CombustionRequestRepository::new(self.db)
            .get_all(filter)
            .await?)
    }

    /// Gets a request with its fuels. Deleted requests are reported as not found.
    pub async fn get_detail(
        &self,
        id: i32,
        user_id: i32,
        is_moderator: bool,
    ) -> Result<CombustionRequestDetail, AppError> {
        let request = self.visible(id).await?;
        if !is_moderator && request.creator_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("User attempted to view request {} owned by another user", id),
            )
            .into());
        }

        self.detail(request).await
    }

    /// Sets the molar volume used for every fuel of a draft.
    ///
    /// # Arguments
    /// - `id` - Request ID
    /// - `user_id` - Caller, who must be the creator
    /// - `molar_volume` - New value, must be positive
    ///
    /// # Returns
    /// - `Ok(CombustionRequest)` - Updated draft
    /// - `Err(AppError::BadRequest)` - Non-positive molar volume
    /// - `Err(AuthError::AccessDenied)` - Caller is not the creator
    /// - `Err(AppError::InvalidState)` - Request is no longer a draft
    pub async fn set_molar_volume(
        &self,
        id: i32,
        user_id: i32,
        molar_volume: f64,
    ) -> Result<CombustionRequest, AppError> {
        let request_repo = CombustionRequestRepository::new(self.db);

        validate_positive("Molar volume", molar_volume)?;
        self.owned_draft(id, user_id).await?;

        if !request_repo.set_molar_volume(id, molar_volume).await? {
            return Err(not_draft(id));
        }

        self.visible(id).await
    }

    /// Changes the volume of one fuel in a draft.
    ///
    /// # Returns
    /// - `Ok(CombustionRequestDetail)` - Draft with its fuels
    /// - `Err(AppError::BadRequest)` - Non-positive volume
    /// - `Err(AppError::NotFound)` - Fuel is not in the draft
    /// - `Err(AppError::InvalidState)` - Request is no longer a draft
    pub async fn update_fuel_volume(
        &self,
        id: i32,
        fuel_id: i32,
        user_id: i32,
        fuel_volume: f64,
    ) -> Result<CombustionRequestDetail, AppError> {
        validate_positive("Fuel volume", fuel_volume)?;
        let request = self.owned_draft(id, user_id).await?;

        if !CombustionRequestFuelRepository::new(self.db)
            .update_volume(id, fuel_id, fuel_volume)
            .await?
        {
            return Err(link_not_found(id, fuel_id));
        }

        self.detail(request).await
    }

    /// Removes one fuel from a draft.
    ///
    /// # Returns
    /// - `Ok(CombustionRequestDetail)` - Draft with the remaining fuels
    /// - `Err(AppError::NotFound)` - Fuel is not in the draft
    /// - `Err(AppError::InvalidState)` - Request is no longer a draft
    pub async fn remove_fuel(
        &self,
        id: i32,
        fuel_id: i32,
        user_id: i32,
    ) -> Result<CombustionRequestDetail, AppError> {
        let request = self.owned_draft(id, user_id).await?;

        if !CombustionRequestFuelRepository::new(self.db)
            .delete(id, fuel_id)
            .await?
        {
            return Err(link_not_found(id, fuel_id));
        }

        self.detail(request).await
    }

    /// `draft → submitted`.
    ///
    /// # Returns
    /// - `Ok(CombustionRequest)` - Submitted request
    /// - `Err(AppError::InvalidState)` - Request is not a draft
    /// - `Err(AppError::BadRequest)` - No fuels, or no positive molar volume
    pub async fn submit(&self, id: i32, user_id: i32) -> Result<CombustionRequest, AppError> {
        let request = self.owned_draft(id, user_id).await?;

        let fuel_count = CombustionRequestFuelRepository::new(self.db)
            .count_by_request(id)
            .await?;
        if fuel_count == 0 {
            return Err(AppError::BadRequest(format!(
                "Request {} has no fuels",
                id
            )));
        }
        if !request.molar_volume.is_some_and(|mv| mv > 0.0) {
            return Err(AppError::BadRequest(format!(
                "Request {} has no molar volume",
                id
            )));
        }

        if !CombustionRequestRepository::new(self.db).submit(id).await? {
            return Err(not_draft(id));
        }

        tracing::info!(request_id = id, user_id, fuel_count, "Request submitted");

        self.visible(id).await
    }

    /// `submitted → completed | rejected` by a moderator. No final result is stored.
    pub async fn moderate(
        &self,
        id: i32,
        moderator_id: i32,
        approve: bool,
    ) -> Result<CombustionRequest, AppError> {
        let request = self.visible(id).await?;
        let status = if approve {
            RequestStatus::Completed
        } else {
            RequestStatus::Rejected
        };

        if request.status != RequestStatus::Submitted
            || !CombustionRequestRepository::new(self.db)
                .moderate(id, moderator_id, status)
                .await?
        {
            return Err(AppError::InvalidState(format!(
                "Request {} is {}, only submitted requests can be moderated",
                id, request.status
            )));
        }

        tracing::info!(request_id = id, moderator_id, %status, "Request moderated");

        self.visible(id).await
    }

    /// `draft | submitted → deleted` by the creator.
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        let request = self.visible(id).await?;
        ensure_owner(&request, user_id)?;

        if !CombustionRequestRepository::new(self.db)
            .soft_delete(id)
            .await?
        {
            return Err(AppError::InvalidState(format!(
                "Request {} is {} and can no longer be deleted",
                id, request.status
            )));
        }

        tracing::info!(request_id = id, user_id, "Request deleted");

        Ok(())
    }

    /// Loads a request unless it is missing or deleted.
    async fn visible(&self, id: i32) -> Result<CombustionRequest, AppError> {
        CombustionRequestRepository::new(self.db)
            .get_by_id(id)
            .await?
            .filter(|request| request.status != RequestStatus::Deleted)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }

    /// Loads a request the user created that is still a draft.
    async fn owned_draft(&self, id: i32, user_id: i32) -> Result<CombustionRequest, AppError> {
        let request = self.visible(id).await?;
        ensure_owner(&request, user_id)?;

        if request.status != RequestStatus::Draft {
            return Err(not_draft(id));
        }

        Ok(request)
    }

    async fn detail(&self, request: CombustionRequest) -> Result<CombustionRequestDetail, AppError> {
        let fuels = CombustionRequestFuelRepository::new(self.db)
            .get_fuels(request.id)
            .await?;

        Ok(CombustionRequestDetail { request, fuels })
    }
}

fn ensure_owner(request: &CombustionRequest, user_id: i32) -> Result<(), AppError> {
    if request.creator_id != user_id {
        return Err(AuthError::AccessDenied(
            user_id,
            format!("User attempted to modify request {} owned by another user", request.id),
        )
        .into());
    }

    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "{} must be a positive number",
            field
        )));
    }

    Ok(())
}

fn not_draft(id: i32) -> AppError {
    AppError::InvalidState(format!("Request {} is no longer a draft", id))
}

fn link_not_found(id: i32, fuel_id: i32) -> AppError {
    AppError::NotFound(format!("Fuel {} is not in request {}", fuel_id, id))
}
