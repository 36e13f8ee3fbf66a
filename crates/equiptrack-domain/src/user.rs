//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: lowercase string (`"user"`, `"technician"`, `"admin"`),
/// both in JWT claims and in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Technician,
    Admin,
}

impl UserRole {
    /// Parse from the wire string. Returns `None` for unknown values.
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "user" => Some(Self::User),
            "technician" => Some(Self::Technician),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Technician => "technician",
            Self::Admin => "admin",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
