//! User domain models, roles and parameters.

use std::fmt;

use crate::model::user::{RegisterUserDto, UpdateUserDto, UserDto};

/// Role derived from a caller's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// No token, or a token without a user.
    Guest,
    Buyer,
    Moderator,
}

impl Role {
    /// Derives the role from a user id and moderator flag.
    ///
    /// A user id of `0` is a guest regardless of the flag.
    pub fn derive(user_id: i32, is_moderator: bool) -> Self {
        if user_id == 0 {
            Role::Guest
        } else if is_moderator {
            Role::Moderator
        } else {
            Role::Buyer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Buyer => "buyer",
            Role::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account without its password hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub name: String,
    pub is_moderator: bool,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            login: entity.login,
            name: entity.name,
            is_moderator: entity.is_moderator,
        }
    }

    pub fn role(&self) -> Role {
        Role::derive(self.id, self.is_moderator)
    }

    pub fn into_dto(self) -> UserDto {
        let role = self.role().to_string();
        UserDto {
            id: self.id,
            login: self.login,
            name: self.name,
            is_moderator: self.is_moderator,
            role,
        }
    }
}

/// Parameters for registering a new buyer account.
#[derive(Debug, Clone)]
pub struct RegisterUserParams {
    pub login: String,
    pub password: String,
    pub name: String,
}

impl RegisterUserParams {
    pub fn from_dto(dto: RegisterUserDto) -> Self {
        Self {
            login: dto.login.trim().to_string(),
            password: dto.password,
            name: dto.name.trim().to_string(),
        }
    }
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub id: i32,
    pub login: Option<String>,
    pub name: Option<String>,
}

impl UpdateUserParams {
    pub fn from_dto(id: i32, dto: UpdateUserDto) -> Self {
        Self {
            id,
            login: dto.login.map(|login| login.trim().to_string()),
            name: dto.name.map(|name| name.trim().to_string()),
        }
    }
}
