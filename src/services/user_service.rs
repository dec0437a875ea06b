use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{hash_password, require_owner_or_admin, verify_password, Identity},
    errors::{AppError, AppResult},
    models::{
        domain::{Role, User},
        dto::{
            request::{ChangePasswordRequest, UpdateProfileRequest, UserListParams},
            response::{MessageResponse, Pagination, UserDto, UserPage},
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn list(&self, params: UserListParams) -> AppResult<UserPage> {
        params.validate()?;
        let pagination = params.pagination();

        let (users, total) = self
            .users
            .list(&params.filter(), pagination.offset(), pagination.limit())
            .await?;

        Ok(UserPage {
            users: users.into_iter().map(UserDto::from).collect(),
            pagination: Pagination::new(pagination.page(), pagination.limit(), total),
        })
    }

    pub async fn get(&self, id: i32) -> AppResult<UserDto> {
        self.find(id).await.map(UserDto::from)
    }

    pub async fn update_profile(&self, id: i32, request: UpdateProfileRequest) -> AppResult<UserDto> {
        request.validate()?;

        let user = self.users.update_profile(id, request.into()).await?;
        Ok(user.into())
    }

    /// Owners must prove the current password. An administrator resetting
    /// someone else's password skips that check.
    pub async fn change_password(
        &self,
        identity: &Identity,
        id: i32,
        request: ChangePasswordRequest,
    ) -> AppResult<MessageResponse> {
        require_owner_or_admin(identity, Some(id))?;
        request.validate()?;

        let user = self.find(id).await?;

        if identity.user_id == user.id {
            let matches = !request.current_password.is_empty()
                && verify_password(&request.current_password, &user.password_hash).await?;
            if !matches {
                return Err(AppError::Unauthorized(
                    "Current password is incorrect".to_string(),
                ));
            }
        }

        let password_hash = hash_password(&request.new_password, self.bcrypt_cost).await?;
        self.users.update_password(user.id, &password_hash).await?;

        log::info!("Password changed for user {} by user {}", user.id, identity.user_id);
        Ok(MessageResponse::new("Password updated successfully"))
    }

    pub async fn update_role(&self, identity: &Identity, id: i32, role: Role) -> AppResult<UserDto> {
        let user = self.users.update_role(id, role).await?;

        log::info!(
            "User {} set role of user {} to {}",
            identity.user_id,
            user.id,
            role
        );
        Ok(user.into())
    }

    async fn find(&self, id: i32) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or_else(user_not_found)
    }
}
