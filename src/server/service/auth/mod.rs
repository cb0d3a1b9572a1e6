//! Account registration, login and logout.

pub mod deny_list;
pub mod jwt;
pub mod password;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{RegisterUserParams, User},
    service::auth::{
        deny_list::TokenDenyList,
        jwt::{Claims, JwtCodec},
        password::{hash_password, verify_password},
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtCodec,
    deny_list: &'a dyn TokenDenyList,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        jwt: &'a JwtCodec,
        deny_list: &'a dyn TokenDenyList,
    ) -> Self {
        Self { db, jwt, deny_list }
    }

    /// Registers a buyer account.
    ///
    /// # Returns
    /// - `Ok(User)` - New account, never a moderator
    /// - `Err(AppError::BadRequest)` - Empty field or login already taken
    pub async fn register(&self, params: RegisterUserParams) -> Result<User, AppError> {
        if params.login.is_empty() || params.password.is_empty() || params.name.is_empty() {
            return Err(AppError::BadRequest(
                "Login, password and name are required".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        if user_repo.find_by_login(&params.login).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "Login {} is already taken",
                params.login
            )));
        }

        let password_hash = hash_password(&params.password)?;
        let user = user_repo
            .create(params.login, password_hash, params.name, false)
            .await?;

        tracing::info!(user_id = user.id, "Registered user {}", user.login);

        Ok(user)
    }

    /// Checks credentials and issues an access token.
    ///
    /// Unknown logins and wrong passwords fail the same way.
    pub async fn login(&self, login: &str, password: &str) -> Result<(String, User), AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(model) = user_repo.find_by_login(login.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, &model.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let user = User::from_entity(model);
        let token = self.jwt.issue(&user)?;

        Ok((token, user))
    }

    /// Revokes the token until it would have expired on its own.
    ///
    /// Deny-list failures are logged and do not fail the logout.
    pub async fn logout(&self, token: &str, claims: &Claims) -> Result<(), AppError> {
        if let Err(e) = self
            .deny_list
            .deny(token, claims.remaining_lifetime())
            .await
        {
            tracing::error!(
                user_id = claims.user_id,
                "Failed to revoke token on logout: {}",
                e
            );
        }

        Ok(())
    }
}
