//! User factory for creating test accounts.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let user = UserFactory::new(&db)
///     .login("buyer")
///     .moderator(true)
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    login: String,
    name: String,
    password_hash: String,
    is_moderator: bool,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - login: `"user_{id}"` where id is auto-incremented
    /// - name: `"User {id}"`
    /// - password_hash: a placeholder that never verifies
    /// - is_moderator: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            login: format!("user_{}", id),
            name: format!("User {}", id),
            password_hash: "not-a-hash".to_string(),
            is_moderator: false,
        }
    }

    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn moderator(mut self, is_moderator: bool) -> Self {
        self.is_moderator = is_moderator;
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            login: ActiveValue::Set(self.login),
            password_hash: ActiveValue::Set(self.password_hash),
            name: ActiveValue::Set(self.name),
            is_moderator: ActiveValue::Set(self.is_moderator),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a buyer with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a moderator with default values.
pub async fn create_moderator(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).moderator(true).build().await
}
