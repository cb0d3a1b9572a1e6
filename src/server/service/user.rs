use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{UpdateUserParams, User},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the caller's own profile.
    pub async fn get_profile(&self, user_id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Updates login and/or name.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated profile
    /// - `Err(AppError::BadRequest)` - Empty value, or login taken by another account
    /// - `Err(AppError::NotFound)` - Account no longer exists
    pub async fn update_profile(&self, params: UpdateUserParams) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if params.login.as_deref().is_some_and(str::is_empty)
            || params.name.as_deref().is_some_and(str::is_empty)
        {
            return Err(AppError::BadRequest(
                "Login and name cannot be empty".to_string(),
            ));
        }

        if let Some(login) = &params.login {
            if let Some(existing) = user_repo.find_by_login(login).await? {
                if existing.id != params.id {
                    return Err(AppError::BadRequest(format!(
                        "Login {} is already taken",
                        login
                    )));
                }
            }
        }

        let user_id = params.id;
        user_repo
            .update(params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }
}
