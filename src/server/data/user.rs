//! User data repository for database operations.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::user::{UpdateUserParams, User};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account with an already hashed password.
    pub async fn create(
        &self,
        login: String,
        password_hash: String,
        name: String,
        is_moderator: bool,
    ) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            login: ActiveValue::Set(login),
            password_hash: ActiveValue::Set(password_hash),
            name: ActiveValue::Set(name),
            is_moderator: ActiveValue::Set(is_moderator),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds an account by login, including its password hash for verification.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Login.eq(login))
            .one(self.db)
            .await
    }

    /// Finds an account by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        Ok(entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .map(User::from_entity))
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user, unchanged when no field was provided
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error, including a login uniqueness violation
    pub async fn update(&self, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(model) = entity::prelude::User::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        if params.login.is_none() && params.name.is_none() {
            return Ok(Some(User::from_entity(model)));
        }

        let mut active: entity::user::ActiveModel = model.into();
        if let Some(login) = params.login {
            active.login = ActiveValue::Set(login);
        }
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }

        let updated = active.update(self.db).await?;

        Ok(Some(User::from_entity(updated)))
    }
}
