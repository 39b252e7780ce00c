//! Authentication and authorization
//!
//! JWT + Argon2 based session authentication and the static role-to-verb
//! permission matrix.

pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{AuthToken, CurrentUser, require_auth, require_role_verb};
pub use permissions::Role;
