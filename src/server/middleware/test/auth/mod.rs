use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::auth::{
        deny_list::{MemoryDenyList, TokenDenyList},
        jwt::JwtCodec,
    },
};

mod require;

fn codec() -> JwtCodec {
    JwtCodec::new("middleware-test-secret", "fuelcalc", Duration::from_secs(3600))
}

fn user(id: i32, is_moderator: bool) -> User {
    User {
        id,
        login: format!("user{}", id),
        name: format!("User {}", id),
        is_moderator,
    }
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
