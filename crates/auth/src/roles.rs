use core::str::FromStr;

use serde::{Deserialize, Serialize};

use riskdesk_core::DomainError;

/// Role granted to a console user.
///
/// The wire form is the upper snake case name (`"CLAIMS_ADJUSTER"`). Role
/// names the console does not know deserialize to [`Role::Unrecognized`] so a
/// single unexpected record cannot break a whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Underwriter,
    ClaimsAdjuster,
    ReinsuranceManager,
    #[serde(other)]
    Unrecognized,
}

impl Role {
    /// Roles an operator may assign, in form order.
    pub const ASSIGNABLE: [Role; 4] = [
        Role::Admin,
        Role::Underwriter,
        Role::ClaimsAdjuster,
        Role::ReinsuranceManager,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Underwriter => "UNDERWRITER",
            Role::ClaimsAdjuster => "CLAIMS_ADJUSTER",
            Role::ReinsuranceManager => "REINSURANCE_MANAGER",
            Role::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Human label used by the role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Underwriter => "Underwriter",
            Role::ClaimsAdjuster => "Claims Adjuster",
            Role::ReinsuranceManager => "Reinsurance Manager",
            Role::Unrecognized => "Unrecognized",
        }
    }

    pub fn is_assignable(&self) -> bool {
        !matches!(self, Role::Unrecognized)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ASSIGNABLE
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}
