pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use claims::{Claims, Identity};
pub use jwt::JwtService;
pub use middleware::AccessControl;
pub use password::{hash_password, verify_password};
pub use policy::{
    require_owner_or_admin, require_role, Capability, ADMIN_ONLY, ADMIN_OR_MODERATOR,
};
