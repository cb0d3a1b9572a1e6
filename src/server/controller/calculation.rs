use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        calculation::{CalculationProgressDto, CalculationResultDto, CalculationSessionDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::calculation::CalculationResultParams,
        service::calculation::CalculationService,
        state::AppState,
    },
};

/// Tag for grouping calculation endpoints in OpenAPI documentation
pub static CALCULATION_TAG: &str = "calculation";

/// Start a calculation session for a submitted request.
///
/// Responds once one job per fuel has been handed to the calculator dispatcher; results
/// arrive later through the callback endpoint.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/combustions/{id}/calculate",
    tag = CALCULATION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 202, description = "Jobs dispatched", body = CalculationSessionDto),
        (status = 400, description = "Request has no fuels", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto),
        (status = 409, description = "Request is not submitted", body = ErrorDto)
    ),
)]
pub async fn start_calculation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Moderator])
        .await?;

    let session = CalculationService::new(&state.db, &state.dispatcher, &state.calculation)
        .start_session(id, auth_user.id())
        .await?;

    Ok((StatusCode::ACCEPTED, Json(session.into_dto())))
}

/// Get how many fuels of a request have been calculated.
///
/// # Access Control
/// - `Buyer` - The request's creator, or any moderator
#[utoipa::path(
    get,
    path = "/api/combustions/{id}/progress",
    tag = CALCULATION_TAG,
    security(("bearer" = [])),
    params(
        ("id" = i32, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request with calculated and total fuel counts", body = CalculationProgressDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 403, description = "Request belongs to another user", body = ErrorDto),
        (status = 404, description = "Request not found", body = ErrorDto)
    ),
)]
pub async fn get_progress(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let progress = CalculationService::new(&state.db, &state.dispatcher, &state.calculation)
        .progress(id)
        .await?;

    if !auth_user.is_moderator() && progress.request.creator_id != auth_user.id() {
        return Err(AuthError::AccessDenied(
            auth_user.id(),
            format!("User attempted to view progress of request {} owned by another user", id),
        )
        .into());
    }

    Ok((StatusCode::OK, Json(progress.into_dto())))
}

/// Receive one fuel's result from the calculator.
///
/// Authenticated by the session token in the body instead of a bearer token. Once the
/// token matches, the response is always success.
#[utoipa::path(
    post,
    path = "/api/async/update-result",
    tag = CALCULATION_TAG,
    request_body = CalculationResultDto,
    responses(
        (status = 200, description = "Result accepted", body = StatusDto),
        (status = 400, description = "Missing or malformed field", body = ErrorDto),
        (status = 403, description = "Unknown request or wrong session token", body = ErrorDto)
    ),
)]
pub async fn update_result(
    State(state): State<AppState>,
    payload: Result<Json<CalculationResultDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let params = CalculationResultParams::from_dto(payload)?;

    CalculationService::new(&state.db, &state.dispatcher, &state.calculation)
        .receive_result(params)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success("Result accepted"))))
}
