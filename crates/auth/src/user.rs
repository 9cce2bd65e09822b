//! User records and the payloads that create or change them.
//!
//! Create and update travel as distinct types: [`NewUser`] carries the
//! username and password, [`UserChanges`] carries neither, so an update can
//! never leak a password or rename an account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use riskdesk_core::{DomainError, DomainResult, Entity, RecordId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User Status
// ─────────────────────────────────────────────────────────────────────────────

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// User may sign in.
    #[default]
    Active,
    /// User is disabled.
    Inactive,
}

impl UserStatus {
    pub const ALL: [UserStatus; 2] = [UserStatus::Active, UserStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown status '{s}'")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Record
// ─────────────────────────────────────────────────────────────────────────────

/// A user as returned by the backend.
///
/// The password never appears here; it is write-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserRecord", into = "UserRecord")]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Role string as sent, kept only when the console does not know it.
    pub unrecognized_role: Option<String>,
    pub status: UserStatus,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Wire shape of [`User`], with the role still a plain string.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(rename = "_id")]
    id: RecordId,
    username: String,
    email: String,
    role: String,
    status: UserStatus,
    #[serde(default)]
    last_login_at: Option<DateTime<Utc>>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let (role, unrecognized_role) = match record.role.parse::<Role>() {
            Ok(role) => (role, None),
            Err(_) => (Role::Unrecognized, Some(record.role)),
        };
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            role,
            unrecognized_role,
            status: record.status,
            last_login_at: record.last_login_at,
        }
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        let role = match user.unrecognized_role {
            Some(raw) => raw,
            None => user.role.as_str().to_string(),
        };
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}

impl User {
    /// Role as the backend named it.
    pub fn role_name(&self) -> &str {
        self.unrecognized_role
            .as_deref()
            .unwrap_or(self.role.as_str())
    }

    /// Date of the last sign-in, or `"Never"`.
    pub fn last_login_label(&self) -> String {
        match self.last_login_at {
            Some(at) => at.format("%Y-%m-%d").to_string(),
            None => "Never".to_string(),
        }
    }

    /// Editable fields of this record, as an update would send them back.
    pub fn changes(&self) -> UserChanges {
        UserChanges {
            email: self.email.clone(),
            role: self.role,
            status: self.status,
        }
    }
}

impl Entity for User {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /users`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
}

impl core::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}

impl NewUser {
    /// Check required fields before anything is sent.
    pub fn validate(&self) -> DomainResult<()> {
        require_filled(&self.username, "Username is required")?;
        require_filled(&self.email, "Email is required")?;
        if self.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }
        require_assignable(self.role)
    }
}

/// Body of `PUT /users/{id}`.
///
/// Has no username and no password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChanges {
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
}

impl UserChanges {
    pub fn validate(&self) -> DomainResult<()> {
        require_filled(&self.email, "Email is required")?;
        require_assignable(self.role)
    }
}

/// What a submitted user form asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserPayload {
    Create(NewUser),
    Update { id: RecordId, changes: UserChanges },
}

impl UserPayload {
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            UserPayload::Create(new_user) => new_user.validate(),
            UserPayload::Update { changes, .. } => changes.validate(),
        }
    }

    /// JSON body exactly as it goes over the wire.
    pub fn to_body(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            UserPayload::Create(new_user) => serde_json::to_value(new_user),
            UserPayload::Update { changes, .. } => serde_json::to_value(changes),
        }
    }
}

fn require_filled(value: &str, message: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(message));
    }
    Ok(())
}

fn require_assignable(role: Role) -> DomainResult<()> {
    if !role.is_assignable() {
        return Err(DomainError::validation("Select a role"));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
