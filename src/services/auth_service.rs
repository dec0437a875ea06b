use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::json;
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, Identity, JwtService},
    config::AdminBootstrap,
    errors::{AppError, AppResult},
    models::{
        domain::{NewUser, Role, User},
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::{AuthResponse, UserDto},
        },
    },
    repositories::{AnalyticsRepository, UserRepository},
};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    jwt_service: Arc<JwtService>,
    bcrypt_cost: u32,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        jwt_service: Arc<JwtService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            analytics,
            jwt_service,
            bcrypt_cost,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let username = request.username.trim().to_string();
        let email = normalize_email(&request.email);

        if self
            .users
            .exists_with_username_or_email(&username, &email)
            .await?
        {
            return Err(AppError::AlreadyExists(
                "User with this username or email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost).await?;
        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
                role: Role::User,
                full_name: request.full_name.map(|n| n.trim().to_string()),
            })
            .await?;

        log::info!("Registered user {} (id {})", user.username, user.id);
        self.track(&user, "register").await;

        self.authenticated(user, "User registered successfully")
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(invalid_credentials)?;

        if !verify_password(&request.password, &user.password_hash).await? {
            return Err(invalid_credentials());
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is disabled".to_string()));
        }

        self.track(&user, "login").await;

        self.authenticated(user, "Login successful")
    }

    pub async fn current_user(&self, identity: &Identity) -> AppResult<UserDto> {
        self.users
            .find_by_id(identity.user_id)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Creates the configured administrator when no administrator exists yet.
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, bootstrap: &AdminBootstrap) -> AppResult<bool> {
        if self.users.count_by_role(Role::Administrator).await? > 0 {
            return Ok(false);
        }

        let password_hash =
            hash_password(bootstrap.password.expose_secret(), self.bcrypt_cost).await?;
        let admin = self
            .users
            .create(NewUser {
                username: bootstrap.username.clone(),
                email: normalize_email(&bootstrap.email),
                password_hash,
                role: Role::Administrator,
                full_name: Some("Administrator".to_string()),
            })
            .await?;

        log::info!("Bootstrapped administrator {} (id {})", admin.username, admin.id);
        Ok(true)
    }

    fn authenticated(&self, user: User, message: &str) -> AppResult<AuthResponse> {
        let token = self.jwt_service.issue(user.id, user.role)?;

        Ok(AuthResponse {
            message: message.to_string(),
            user: user.into(),
            token,
        })
    }

    async fn track(&self, user: &User, activity_type: &str) {
        let data = json!({ "username": user.username });
        if let Err(e) = self
            .analytics
            .record_activity(Some(user.id), activity_type, data)
            .await
        {
            log::warn!(
                "Failed to record {} activity for user {}: {}",
                activity_type,
                user.id,
                e
            );
        }
    }
}
