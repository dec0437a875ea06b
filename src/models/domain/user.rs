use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;

/// Closed set of roles. Declaration order is display order only; access
/// checks compare by membership, never by rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin", alias = "administrator")]
    Administrator,
    #[serde(rename = "moderator")]
    Moderator,
    #[serde(rename = "user")]
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Moderator, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" | "administrator" => Ok(Role::Administrator),
            "moderator" => Ok(Role::Moderator),
            "user" => Ok(Role::User),
            other => Err(AppError::ValidationError(format!("Unknown role '{}'", other))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Stored account. Deliberately not `Serialize`: responses go through
/// `UserDto`, which has no password field.
#[derive(Clone, Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub full_name: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub search: Option<String>,
}

#[cfg(test)]
impl User {
    pub fn test_user(id: i32, username: &str, role: Role) -> Self {
        let now = Utc::now();
        User {
            id,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: String::new(),
            role,
            full_name: None,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
