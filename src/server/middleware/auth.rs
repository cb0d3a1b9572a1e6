use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::server::{
    error::{auth::AuthError, AppError},
    service::auth::{
        deny_list::TokenDenyList,
        jwt::{Claims, JwtCodec},
    },
};

const BEARER_PREFIX: &str = "Bearer ";

pub enum Permission {
    /// Any authenticated account.
    Buyer,
    Moderator,
}

/// Caller identified by a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: Claims,
    /// Raw token, kept for logout.
    pub token: String,
}

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.claims.user_id
    }

    pub fn is_moderator(&self) -> bool {
        self.claims.is_moderator
    }
}

pub struct AuthGuard<'a> {
    jwt: &'a JwtCodec,
    deny_list: &'a dyn TokenDenyList,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(jwt: &'a JwtCodec, deny_list: &'a dyn TokenDenyList, headers: &'a HeaderMap) -> Self {
        Self {
            jwt,
            deny_list,
            headers,
        }
    }

    /// Authenticates the caller and checks every listed permission.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - Token is valid, not revoked, and grants every permission
    /// - `Err(AuthError::MissingToken | InvalidToken | TokenExpired | TokenRevoked)` - 401
    /// - `Err(AuthError::AccessDenied)` - 403
    pub async fn require(&self, permissions: &[Permission]) -> Result<AuthUser, AppError> {
        let token = self.bearer_token()?;
        let claims = self.jwt.verify(token)?;

        if self.deny_list.is_denied(token).await? {
            return Err(AuthError::TokenRevoked.into());
        }

        for permission in permissions {
            match permission {
                Permission::Buyer => {}
                Permission::Moderator => {
                    if !claims.is_moderator {
                        return Err(AuthError::AccessDenied(
                            claims.user_id,
                            "User attempted a moderator action without the moderator role"
                                .to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(AuthUser {
            claims,
            token: token.to_string(),
        })
    }

    /// Authenticates the caller if possible. Any failure makes the caller a guest.
    pub async fn optional(&self) -> Option<AuthUser> {
        match self.require(&[]).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!("Treating caller as guest: {}", e);
                None
            }
        }
    }

    fn bearer_token(&self) -> Result<&'a str, AuthError> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)
    }
}
