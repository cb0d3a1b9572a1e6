use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        user::{LoginDto, RegisterUserDto, TokenDto, UpdateUserDto, UserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{RegisterUserParams, UpdateUserParams},
        service::{auth::AuthService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Register a buyer account.
///
/// # Returns
/// - `201 Created` - Account created
/// - `400 Bad Request` - Missing field or login already taken
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = USER_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Missing field or login already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db, &state.jwt, state.deny_list.as_ref())
        .register(RegisterUserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Log in and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = USER_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Access token issued", body = TokenDto),
        (status = 401, description = "Invalid login or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::new(&state.db, &state.jwt, state.deny_list.as_ref())
        .login(&payload.login, &payload.password)
        .await?;

    let dto = TokenDto {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expires_in().as_secs(),
        user: user.into_dto(),
    };

    Ok((StatusCode::OK, Json(dto)))
}

/// Revoke the caller's token.
///
/// # Access Control
/// - `Buyer` - Any authenticated user
#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token revoked", body = StatusDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    AuthService::new(&state.db, &state.jwt, state.deny_list.as_ref())
        .logout(&auth_user.token, &auth_user.claims)
        .await?;

    Ok((StatusCode::OK, Json(StatusDto::success("Logged out"))))
}

/// Get the caller's profile.
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = UserDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 404, description = "Account no longer exists", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let user = UserService::new(&state.db)
        .get_profile(auth_user.id())
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Update the caller's login and/or display name.
///
/// Claims in already issued tokens keep the old values until the next login.
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = USER_TAG,
    security(("bearer" = [])),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "Updated profile", body = UserDto),
        (status = 400, description = "Empty value or login already taken", body = ErrorDto),
        (status = 401, description = "Missing, invalid or revoked token", body = ErrorDto),
        (status = 404, description = "Account no longer exists", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_user = AuthGuard::new(&state.jwt, state.deny_list.as_ref(), &headers)
        .require(&[Permission::Buyer])
        .await?;

    let user = UserService::new(&state.db)
        .update_profile(UpdateUserParams::from_dto(auth_user.id(), payload))
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
