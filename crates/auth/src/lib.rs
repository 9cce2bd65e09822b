//! `riskdesk-auth`: users, roles and the session boundary.
//!
//! This crate is intentionally decoupled from HTTP and rendering.

pub mod authorize;
pub mod palette;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{authorize_user_admin, require_role, AuthzError};
pub use roles::Role;
pub use session::{AuthContext, Principal};
pub use user::{NewUser, User, UserChanges, UserPayload, UserStatus};
