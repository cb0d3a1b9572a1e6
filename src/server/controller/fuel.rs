use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        combustion::CombustionRequestDetailDto,
        fuel::{CreateFuelDto, FuelDto, UpdateFuelDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::fuel::{CreateFuelParams, Fuel, UpdateFuelParams},
        service::{combustion::CombustionService, fuel::FuelService},
        state::AppState,
    },
};

/// Tag for grouping fuel catalog endpoints in OpenAPI documentation
pub static FUEL_TAG: &str = "fuel";

/// Header carrying the original file name of an uploaded image.
pub static FILENAME_HEADER: &str = "X-Filename";

const DEFAULT_FUEL_VOLUME: f64 = 1.0;

#[derive(Deserialize)]
pub struct FuelSearchQuery {
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct AddToDraftQuery {
    pub fuel_volume: Option<f64>,
}

/// List active fuels.
///
/// Public. Soft-deleted fuels are never listed.
#[utoipa::path(
    get,
    path = "/api/fuels",
    tag = FUEL_TAG,
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive title substring")
    ),
    responses(
        (status = 200, description = "Active fuels", body = Vec<FuelDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_fuels(
    State(state): State<AppState>,
    Query(query): Query<FuelSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let fuels = FuelService::new(&state.db, state.images.as_ref())
        .list(query.title.as_deref())
        .await?;

    let dtos: Vec<FuelDto> = fuels.into_iter().map(Fuel::into_dto).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get one active fuel.
#[utoipa::path(
    get,
    path = "/api/fuels/{id}",
    tag = FUEL_TAG,
    params(
        ("id" = i32, Path, description = "Fuel ID")
    ),
    responses(
        (status = 200, description = "Fuel", body = FuelDto),
        (status = 404, description = "Fuel missing or deleted", body = ErrorDto)
    ),
)]
pub async fn get_fuel(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let fuel = FuelService::new(&state.db, state.images.as_ref())
        .get(id)
        .await?;

    Ok((StatusCode::OK, Json(fuel.into_dto())))
}

/// Create a fuel.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/fuels",
    tag = FUEL_TAG,
    security(("bearer" = [])),
    request_body = CreateFuelDto,
    responses(
        (status = 201, description = "Fuel created", body = FuelDto),
        (status = 400, description = "Missing title", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto)
    ),
)]
pub async fn create_fuel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateFuelDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    let fuel = FuelService::new(&state.db, state.images.as_ref())
        .create(CreateFuelParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(fuel.into_dto())))
}

/// Update a fuel.
///
/// Absent fields keep their stored value.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    put,
    path = "/api/fuels/{id}",
    tag = FUEL_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Fuel ID")
    ),
    request_body = UpdateFuelDto,
    responses(
        (status = 200, description = "Updated fuel", body = FuelDto),
        (status = 400, description = "Empty title", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Fuel missing or deleted", body = ErrorDto)
    ),
)]
pub async fn update_fuel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFuelDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    let fuel = FuelService::new(&state.db, state.images.as_ref())
        .update(UpdateFuelParams::from_dto(id, payload))
        .await?;

    Ok((StatusCode::OK, Json(fuel.into_dto())))
}

/// Soft-delete a fuel and remove its image.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    delete,
    path = "/api/fuels/{id}",
    tag = FUEL_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Fuel ID")
    ),
    responses(
        (status = 200, description = "Fuel deleted", body = StatusDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Fuel missing or already deleted", body = ErrorDto)
    ),
)]
pub async fn delete_fuel(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    FuelService::new(&state.db, state.images.as_ref())
        .delete(id)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success("Fuel deleted"))))
}

/// Upload a card image for a fuel.
///
/// The body is the raw image. The file name comes from the `X-Filename` header and the
/// media type from `Content-Type`.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/fuels/{id}/image",
    tag = FUEL_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Fuel ID"),
        ("X-Filename" = String, Header, description = "Original file name")
    ),
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Fuel with the new image reference", body = FuelDto),
        (status = 400, description = "Missing file name or empty body", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Fuel missing or deleted", body = ErrorDto)
    ),
)]
pub async fn upload_fuel_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    let filename = headers
        .get(FILENAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} header is required", FILENAME_HEADER)))?;
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream");

    let fuel = FuelService::new(&state.db, state.images.as_ref())
        .upload_image(id, filename, &body, content_type)
        .await?;

    Ok((StatusCode::OK, Json(fuel.into_dto())))
}

/// Add a fuel to the caller's draft request.
///
/// The draft is created on first use.
///
/// # Access Control
/// - `Buyer` - Any authenticated user
#[utoipa::path(
    post,
    path = "/api/fuels/{id}/draft",
    tag = FUEL_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Fuel ID"),
        ("fuel_volume" = Option<f64>, Query, description = "Fuel volume (default: 1.0)")
    ),
    responses(
        (status = 201, description = "Draft with the added fuel", body = CombustionRequestDetailDto),
        (status = 400, description = "Invalid volume or fuel already in the draft", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 404, description = "Fuel missing or deleted", body = ErrorDto)
    ),
)]
pub async fn add_fuel_to_draft(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Query(query): Query<AddToDraftQuery>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let draft = CombustionService::new(&state.db)
        .add_fuel_to_draft(
            auth_user.id(),
            id,
            query.fuel_volume.unwrap_or(DEFAULT_FUEL_VOLUME),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(draft.into_dto())))
}
