use thiserror::Error;

use crate::{AuthContext, Role};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("forbidden: requires role '{0}'")]
    Forbidden(Role),
}

/// Require the session's operator to hold `role`.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn require_role(ctx: &AuthContext, role: Role) -> Result<(), AuthzError> {
    match ctx.role() {
        None => Err(AuthzError::Unauthenticated),
        Some(held) if held == role => Ok(()),
        Some(_) => Err(AuthzError::Forbidden(role)),
    }
}

/// User administration is reserved to `ADMIN` sessions.
pub fn authorize_user_admin(ctx: &AuthContext) -> Result<(), AuthzError> {
    let result = require_role(ctx, Role::Admin);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "user administration denied");
    }
    result
}
