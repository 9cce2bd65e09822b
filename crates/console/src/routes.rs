//! Path resolution for the console.

use riskdesk_auth::{authorize_user_admin, AuthContext, AuthzError};
use riskdesk_core::PolicyId;

/// Screens mounted under the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Users,
}

impl AdminRoute {
    /// Resolve a path relative to the admin area (`""` is the user list).
    pub fn resolve(rest: &str) -> Option<Self> {
        match rest.trim_matches('/') {
            "" => Some(AdminRoute::Users),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleRoute {
    Admin(AdminRoute),
    /// Allocation table; `None` shows the policy prompt.
    Allocations(Option<PolicyId>),
    NotFound,
}

impl ConsoleRoute {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');
        let (head, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        match head {
            "admin" => AdminRoute::resolve(rest)
                .map(ConsoleRoute::Admin)
                .unwrap_or(ConsoleRoute::NotFound),
            "reinsurance" => {
                let (section, policy) = rest.split_once('/').unwrap_or((rest, ""));
                if section != "allocations" || policy.contains('/') {
                    return ConsoleRoute::NotFound;
                }
                match urlencoding::decode(policy) {
                    Ok(policy) => ConsoleRoute::Allocations(PolicyId::parse_optional(Some(&policy))),
                    Err(_) => ConsoleRoute::NotFound,
                }
            }
            _ => ConsoleRoute::NotFound,
        }
    }

    /// Path for this route; the policy segment is percent-encoded.
    pub fn path(&self) -> String {
        match self {
            ConsoleRoute::Admin(AdminRoute::Users) => "/admin".to_string(),
            ConsoleRoute::Allocations(None) => "/reinsurance/allocations".to_string(),
            ConsoleRoute::Allocations(Some(policy_id)) => {
                format!(
                    "/reinsurance/allocations/{}",
                    urlencoding::encode(policy_id.as_str())
                )
            }
            ConsoleRoute::NotFound => "/".to_string(),
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, ConsoleRoute::Admin(_))
    }
}

/// Parse `path` and check the session may open it.
pub fn resolve(path: &str, ctx: &AuthContext) -> Result<ConsoleRoute, AuthzError> {
    let route = ConsoleRoute::parse(path);
    if route.requires_admin() {
        authorize_user_admin(ctx)?;
    }
    Ok(route)
}
