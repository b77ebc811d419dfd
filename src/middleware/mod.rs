pub mod auth;
pub mod role;

pub use auth::{optional_auth, require_auth, AuthUser};
pub use role::{check_role, require_admin, require_role};
