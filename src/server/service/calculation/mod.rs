//! Asynchronous calculation orchestration.
//!
//! A moderator starts a session on a submitted request. One job per linked fuel is dispatched
//! to the external calculator. Each result comes back through the callback endpoint
//! authenticated by the session token. Once every link holds a partial energy, the request is
//! completed with their sum.

pub mod calculator;
pub mod dispatcher;

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        combustion_request::CombustionRequestRepository,
        combustion_request_fuel::CombustionRequestFuelRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        calculation::{CalculationProgress, CalculationResultParams, CalculationSession},
        combustion::{CombustionRequest, RequestStatus, DEFAULT_MOLAR_VOLUME},
    },
    service::calculation::dispatcher::CalculationDispatcher,
};

const TOKEN_LENGTH: usize = 32;

/// Settings shared by every calculation session.
#[derive(Clone, Debug)]
pub struct CalculationSettings {
    /// URL the calculator posts results to.
    pub callback_url: String,
    /// Fixed session token shared with the calculator. A random token per session when `None`.
    pub service_token: Option<String>,
}

pub struct CalculationService<'a> {
    db: &'a DatabaseConnection,
    dispatcher: &'a CalculationDispatcher,
    settings: &'a CalculationSettings,
}

impl<'a> CalculationService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        dispatcher: &'a CalculationDispatcher,
        settings: &'a CalculationSettings,
    ) -> Self {
        Self {
            db,
            dispatcher,
            settings,
        }
    }

    /// Starts a calculation session and fans out one job per linked fuel.
    ///
    /// Returns as soon as the jobs are spawned. The initiating moderator is recorded on the
    /// request when it has none, so automatic completion can attribute the result.
    ///
    /// # Returns
    /// - `Ok(CalculationSession)` - Jobs dispatched
    /// - `Err(AppError::NotFound)` - No such request
    /// - `Err(AppError::InvalidState)` - Request is not `submitted`
    /// - `Err(AppError::BadRequest)` - Request has no fuels
    pub async fn start_session(
        &self,
        request_id: i32,
        initiator_id: i32,
    ) -> Result<CalculationSession, AppError> {
        let request_repo = CombustionRequestRepository::new(self.db);
        let link_repo = CombustionRequestFuelRepository::new(self.db);

        let request = request_repo
            .get_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        if request.status != RequestStatus::Submitted {
            return Err(AppError::InvalidState(format!(
                "Request {} is {}, only submitted requests can be calculated",
                request_id, request.status
            )));
        }

        let inputs = link_repo.get_calculation_inputs(request_id).await?;
        if inputs.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Request {} has no fuels to calculate",
                request_id
            )));
        }

        let molar_volume = request.molar_volume.unwrap_or(DEFAULT_MOLAR_VOLUME);
        let token = self
            .settings
            .service_token
            .clone()
            .unwrap_or_else(generate_session_token);
        let moderator_id = request.moderator_id.is_none().then_some(initiator_id);

        if !request_repo
            .start_calculation(request_id, &token, moderator_id)
            .await?
        {
            return Err(AppError::InvalidState(format!(
                "Request {} left the submitted state",
                request_id
            )));
        }
        link_repo.reset_results(request_id).await?;

        let fuel_count = inputs.len();
        for input in inputs {
            let job = input.into_job(request_id, molar_volume, &self.settings.callback_url);
            self.dispatcher.dispatch(job, token.clone()).await;
        }

        tracing::info!(
            request_id,
            fuel_count,
            "Dispatched calculation jobs for request"
        );

        Ok(CalculationSession {
            request_id,
            fuel_count,
            molar_volume,
            token,
            callback_url: self.settings.callback_url.clone(),
        })
    }

    /// Stores one fuel's partial energy and completes the request once all are in.
    ///
    /// Results for links that already hold one are accepted and ignored. After the token
    /// check passes this only fails on infrastructure errors.
    ///
    /// # Returns
    /// - `Ok(())` - Result accepted
    /// - `Err(AuthError::InvalidSessionToken)` - Unknown request or token mismatch; nothing
    ///   was written
    pub async fn receive_result(&self, params: CalculationResultParams) -> Result<(), AppError> {
        let request_repo = CombustionRequestRepository::new(self.db);
        let link_repo = CombustionRequestFuelRepository::new(self.db);
        let request_id = params.request_id;
        let fuel_id = params.fuel_id;

        let stored_token = request_repo.get_calculation_token(request_id).await?;
        let authentic = stored_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), params.token.as_bytes()));
        if !authentic {
            return Err(AuthError::InvalidSessionToken(request_id).into());
        }

        let Some(request) = request_repo.get_by_id(request_id).await? else {
            return Err(AuthError::InvalidSessionToken(request_id).into());
        };
        // A session token survives moderation and deletion of its request.
        if request.status.is_terminal() {
            tracing::warn!(
                request_id,
                fuel_id,
                status = %request.status,
                "Ignoring calculation result for finished request"
            );
            return Ok(());
        }

        if link_repo
            .record_result(request_id, fuel_id, params.result)
            .await?
        {
            tracing::info!(request_id, fuel_id, result = params.result, "Stored calculation result");
        } else {
            tracing::warn!(
                request_id,
                fuel_id,
                "No uncalculated link matched the result, ignoring it"
            );
        }

        let progress = self.counts(request).await?;
        tracing::debug!(
            request_id,
            calculated = progress.calculated_count,
            total = progress.total_count,
            "Calculation progress"
        );

        if progress.is_complete() {
            self.complete(progress.request).await?;
        }

        Ok(())
    }

    /// Gets the request with its calculated and total link counts.
    ///
    /// # Arguments
    /// - `request_id` - Request to report on
    ///
    /// # Returns
    /// - `Ok(CalculationProgress)` - Request fields with link counts
    /// - `Err(AppError::NotFound)` - No such request, or the request was deleted
    pub async fn progress(&self, request_id: i32) -> Result<CalculationProgress, AppError> {
        let request = CombustionRequestRepository::new(self.db)
            .get_by_id(request_id)
            .await?
            .filter(|request| request.status != RequestStatus::Deleted)
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", request_id)))?;

        self.counts(request).await
    }

    async fn counts(&self, request: CombustionRequest) -> Result<CalculationProgress, AppError> {
        let link_repo = CombustionRequestFuelRepository::new(self.db);

        let total_count = link_repo.count_by_request(request.id).await?;
        let calculated_count = link_repo.count_calculated(request.id).await?;

        Ok(CalculationProgress {
            request,
            calculated_count,
            total_count,
        })
    }

    /// Sums the partial energies and moves the request to `completed`.
    ///
    /// Only the caller whose conditional update claims the request logs the completion;
    /// concurrent callers see the update affect no row and return quietly.
    async fn complete(&self, request: CombustionRequest) -> Result<(), AppError> {
        let request_repo = CombustionRequestRepository::new(self.db);
        let link_repo = CombustionRequestFuelRepository::new(self.db);
        let request_id = request.id;

        let final_result = link_repo.sum_energy(request_id).await?;

        let moderator_id = match request.moderator_id {
            Some(moderator_id) => Some(moderator_id),
            None => request_repo
                .get_by_id(request_id)
                .await?
                .and_then(|fresh| fresh.moderator_id),
        };
        let Some(moderator_id) = moderator_id else {
            tracing::error!(
                request_id,
                final_result,
                "No moderator recorded for calculated request, leaving it submitted"
            );
            return Ok(());
        };

        if request_repo
            .complete_calculation(request_id, final_result, moderator_id, Utc::now())
            .await?
        {
            tracing::info!(request_id, final_result, "Request completed by calculation");
        } else {
            tracing::debug!(request_id, "Request already completed by another result");
        }

        Ok(())
    }
}

/// Generates a random alphanumeric session token.
fn generate_session_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
