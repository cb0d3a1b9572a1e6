use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        combustion::{
            CartDto, CombustionRequestDetailDto, CombustionRequestDto, ModerateDto,
            UpdateFuelVolumeDto, UpdateMolarVolumeDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::combustion::{CombustionFilter, CombustionRequest, RequestStatus},
        service::combustion::CombustionService,
        state::AppState,
    },
};

/// Tag for grouping combustion request endpoints in OpenAPI documentation
pub static COMBUSTION_TAG: &str = "combustion";

#[derive(Deserialize)]
pub struct CombustionListQuery {
    pub status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CombustionListQuery {
    fn into_filter(self) -> Result<CombustionFilter, AppError> {
        let status = self
            .status
            .filter(|status| !status.is_empty())
            .map(|status| status.parse::<RequestStatus>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(CombustionFilter {
            creator_id: None,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Get the caller's draft id and fuel count.
///
/// Guests and callers without a draft get zeros.
#[utoipa::path(
    get,
    path = "/api/combustions/cart",
    tag = COMBUSTION_TAG,
    responses(
        (status = 200, description = "Draft summary", body = CartDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .optional()
        .await;

    let cart = CombustionService::new(&state.db)
        .cart(auth_user.map(|user| user.id()))
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

/// List combustion requests.
///
/// Buyers see their own requests, moderators see all. Drafts and deleted requests are
/// hidden unless requested through `status`.
///
/// # Access Control
/// - `Buyer` - Any authenticated user
#[utoipa::path(
    get,
    path = "/api/combustions",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("status" = Option<String>, Query, description = "draft, submitted, completed, rejected or deleted"),
        ("start_date" = Option<DateTime<Utc>>, Query, description = "Created at or after (RFC 3339)"),
        ("end_date" = Option<DateTime<Utc>>, Query, description = "Created at or before (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Matching requests, newest first", body = Vec<CombustionRequestDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto)
    ),
)]
pub async fn list_combustions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CombustionListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let requests = CombustionService::new(&state.db)
        .list(auth_user.id(), auth_user.is_moderator(), query.into_filter()?)
        .await?;

    let dtos: Vec<CombustionRequestDto> = requests
        .into_iter()
        .map(CombustionRequest::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get a request with its fuels and per-fuel results.
///
/// # Access Control
/// - `Buyer` - The request's creator, or any moderator
#[utoipa::path(
    get,
    path = "/api/combustions/{id}",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request with fuels", body = CombustionRequestDetailDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request missing or deleted", body = ErrorDto)
    ),
)]
pub async fn get_combustion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let detail = CombustionService::new(&state.db)
        .get_detail(id, auth_user.id(), auth_user.is_moderator())
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Set the molar volume of the caller's draft.
#[utoipa::path(
    put,
    path = "/api/combustions/{id}",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    request_body = UpdateMolarVolumeDto,
    responses(
        (status = 200, description = "Updated request", body = CombustionRequestDto),
        (status = 400, description = "Molar volume is not positive", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request missing or deleted", body = ErrorDto),
        (status = 409, description = "Request is no longer a draft", body = ErrorDto)
    ),
)]
pub async fn update_molar_volume(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMolarVolumeDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let request = CombustionService::new(&state.db)
        .set_molar_volume(id, auth_user.id(), payload.molar_volume)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Submit the caller's draft for moderation.
#[utoipa::path(
    put,
    path = "/api/combustions/{id}/submit",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Submitted request", body = CombustionRequestDto),
        (status = 400, description = "No fuels or no molar volume", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request missing or deleted", body = ErrorDto),
        (status = 409, description = "Request is no longer a draft", body = ErrorDto)
    ),
)]
pub async fn submit_combustion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let request = CombustionService::new(&state.db)
        .submit(id, auth_user.id())
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Approve or reject a submitted request.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    put,
    path = "/api/combustions/{id}/moderate",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    request_body = ModerateDto,
    responses(
        (status = 200, description = "Completed or rejected request", body = CombustionRequestDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Request missing or deleted", body = ErrorDto),
        (status = 409, description = "Request is not submitted", body = ErrorDto)
    ),
)]
pub async fn moderate_combustion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<ModerateDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    let request = CombustionService::new(&state.db)
        .moderate(id, auth_user.id(), payload.approve)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Soft-delete the caller's draft or submitted request.
#[utoipa::path(
    delete,
    path = "/api/combustions/{id}",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request deleted", body = StatusDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request missing or already deleted", body = ErrorDto),
        (status = 409, description = "Request is already completed or rejected", body = ErrorDto)
    ),
)]
pub async fn delete_combustion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    CombustionService::new(&state.db)
        .delete(id, auth_user.id())
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success("Request deleted"))))
}

/// Change the volume of a fuel in the caller's draft.
#[utoipa::path(
    put,
    path = "/api/combustions/{id}/fuels/{fuel_id}",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("fuel_id" = i32, Path, description = "Fuel ID")
    ),
    request_body = UpdateFuelVolumeDto,
    responses(
        (status = 200, description = "Draft with updated fuels", body = CombustionRequestDetailDto),
        (status = 400, description = "Volume is not positive", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request or fuel link not found", body = ErrorDto),
        (status = 409, description = "Request is no longer a draft", body = ErrorDto)
    ),
)]
pub async fn update_fuel_volume(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, fuel_id)): Path<(i32, i32)>,
    Json(payload): Json<UpdateFuelVolumeDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let detail = CombustionService::new(&state.db)
        .update_fuel_volume(id, fuel_id, auth_user.id(), payload.fuel_volume)
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}

/// Remove a fuel from the caller's draft.
#[utoipa::path(
    delete,
    path = "/api/combustions/{id}/fuels/{fuel_id}",
    tag = COMBUSTION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("fuel_id" = i32, Path, description = "Fuel ID")
    ),
    responses(
        (status = 200, description = "Draft with remaining fuels", body = CombustionRequestDetailDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request or fuel link not found", body = ErrorDto),
        (status = 409, description = "Request is no longer a draft", body = ErrorDto)
    ),
)]
pub async fn remove_fuel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((id, fuel_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let detail = CombustionService::new(&state.db)
        .remove_fuel(id, fuel_id, auth_user.id())
        .await?;

    Ok((StatusCode::OK, Json(detail.into_dto())))
}
