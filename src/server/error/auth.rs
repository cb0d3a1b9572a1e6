use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer <token>` header on a protected route.
    #[error("Authorization header is missing or is not a bearer token")]
    MissingToken,

    /// Token is malformed, signed with another key or algorithm, or issued elsewhere.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token lifetime has passed.
    #[error("Token has expired")]
    TokenExpired,

    /// Token was revoked through logout.
    #[error("Token has been revoked")]
    TokenRevoked,

    /// Login and password do not match a stored account.
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// Authenticated user lacks the role a route requires.
    ///
    /// # Fields
    /// - User ID of the caller
    /// - Reason logged server-side
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Calculation result arrived for an unknown request or with the wrong session token.
    #[error("Calculation result rejected for request {0}")]
    InvalidSessionToken(i32),
}

/// Converts authentication errors into HTTP responses.
///
/// - Token and credential failures → 401 Unauthorized
/// - Role failures and rejected calculation results → 403 Forbidden
///
/// Details are logged at debug level; clients get a short generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "Authorization required"),
            Self::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token"),
            Self::TokenExpired => (StatusCode::UNAUTHORIZED, "Token has expired"),
            Self::TokenRevoked => (StatusCode::UNAUTHORIZED, "Token has been revoked"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid login or password"),
            Self::AccessDenied(_, _) => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            Self::InvalidSessionToken(_) => (StatusCode::FORBIDDEN, "Invalid calculation token"),
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}
