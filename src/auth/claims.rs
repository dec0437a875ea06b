use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Role,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    pub role: Role,
    pub iat: i64, // Issued at (UTC timestamp)
    pub exp: i64, // Expiration time (UTC timestamp)
}

impl Claims {
    pub fn new(user_id: i32, role: Role, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: user_id.to_string(),
            role,
            iat,
            exp: iat.saturating_add(lifetime.num_seconds()),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn identity(&self) -> AppResult<Identity> {
        let user_id = self
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Malformed token subject".to_string()))?;

        Ok(Identity {
            user_id,
            role: self.role,
        })
    }
}

/// Who is making the request, as established by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }
}
