//! The closed set of user roles.
//!
//! [`Role`] governs every authorization decision. Stored as lowercase
//! text in the `users` table; parsing rejects anything outside the set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One of the three roles a user can hold.
///
/// The lifecycle manager only ever advances `Guest` to `Member`; `Admin`
/// is assigned exclusively through the direct role-edit endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Anonymous-tier account; may browse and apply for an agreement.
    Guest,
    /// Resident with an accepted agreement.
    Member,
    /// Administrator; may approve/reject agreements and edit roles.
    Admin,
}

impl Role {
    /// Returns the canonical lowercase string used in storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" | "user" => Ok(Self::Guest),
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(ApiError::Validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("guest".parse::<Role>().ok(), Some(Role::Guest));
        assert_eq!("member".parse::<Role>().ok(), Some(Role::Member));
        assert_eq!("admin".parse::<Role>().ok(), Some(Role::Admin));
    }

    #[test]
    fn accepts_legacy_user_alias() {
        assert_eq!("user".parse::<Role>().ok(), Some(Role::Guest));
    }

    #[test]
    fn rejects_anything_outside_the_set() {
        assert!("superadmin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for role in [Role::Guest, Role::Member, Role::Admin] {
            let parsed = role.as_str().parse::<Role>().ok();
            assert_eq!(parsed, Some(role));
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&Role::Member).ok();
        assert_eq!(json.as_deref(), Some("\"member\""));
    }
}
