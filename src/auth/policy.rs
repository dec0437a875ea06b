use crate::{
    auth::Identity,
    errors::{AppError, AppResult},
    models::domain::Role,
};

pub const ADMIN_ONLY: &[Role] = &[Role::Administrator];
pub const ADMIN_OR_MODERATOR: &[Role] = &[Role::Administrator, Role::Moderator];

/// Declarative requirement attached to a route and evaluated by
/// [`AccessControl`](crate::auth::AccessControl) before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any valid token.
    Authenticated,
    /// The token's role must be listed. There is no hierarchy: an
    /// administrator only passes when `Role::Administrator` is in the set.
    AnyRole(&'static [Role]),
    /// The path segment named `param` must equal the caller's user id,
    /// unless the caller is an administrator.
    OwnerOrAdmin { param: &'static str },
}

impl Capability {
    /// Name of the path parameter this capability needs, if any.
    pub fn path_param(&self) -> Option<&'static str> {
        match self {
            Capability::OwnerOrAdmin { param } => Some(param),
            _ => None,
        }
    }

    pub fn authorize(&self, identity: &Identity, path_value: Option<&str>) -> AppResult<()> {
        match self {
            Capability::Authenticated => Ok(()),
            Capability::AnyRole(roles) => require_role(identity, roles),
            Capability::OwnerOrAdmin { .. } => {
                // A segment that is not a user id can never be owned.
                let owner = path_value.and_then(|v| v.parse::<i32>().ok());
                require_owner_or_admin(identity, owner)
            }
        }
    }
}

pub fn require_role(identity: &Identity, allowed: &[Role]) -> AppResult<()> {
    if !allowed.contains(&identity.role) {
        return Err(AppError::Forbidden("Insufficient permissions".to_string()));
    }
    Ok(())
}

pub fn require_owner_or_admin(identity: &Identity, resource_owner: Option<i32>) -> AppResult<()> {
    if identity.is_admin() || resource_owner == Some(identity.user_id) {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "You can only modify your own account".to_string(),
    ))
}
