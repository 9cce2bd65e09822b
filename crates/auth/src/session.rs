use crate::Role;

/// The signed-in operator, as the console sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

/// Explicit session context handed to the HTTP client and route guards.
///
/// Nothing in the console reads session state from a global; whoever mounts a
/// component passes one of these in.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<Principal>,
    token: Option<String>,
}

impl AuthContext {
    /// Session with no signed-in operator and no credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(username: impl Into<String>, role: Role, token: impl Into<String>) -> Self {
        Self {
            principal: Some(Principal {
                username: username.into(),
                role,
            }),
            token: Some(token.into()),
        }
    }

    /// Credentials without a known principal (e.g. a token from the environment).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            principal: None,
            token: Some(token.into()),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.principal.as_ref().map(|p| p.role)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }
}

impl core::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthContext")
            .field("principal", &self.principal)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
