//! Badge colours for roles and statuses.
//!
//! Pure lookups, kept apart from any markup so they can be tested alone.

use crate::{Role, UserStatus};

/// Colour for anything without a dedicated entry.
pub const FALLBACK_COLOR: &str = "#999";

pub fn role_color(role: Role) -> &'static str {
    match role {
        Role::Admin => "#F44336",
        Role::Underwriter => "#2196F3",
        Role::ClaimsAdjuster => "#FF9800",
        Role::ReinsuranceManager => "#4CAF50",
        Role::Unrecognized => FALLBACK_COLOR,
    }
}

pub fn status_color(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "#4CAF50",
        UserStatus::Inactive => FALLBACK_COLOR,
    }
}
