use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path the login screen lives at. Unauthenticated sessions are sent here.
pub const LOGIN_PATH: &str = "/login";

/// The three principal kinds the platform authenticates.
///
/// Every authenticated identity carries exactly one role; the role decides
/// which dashboard the client navigates to after login and which commands
/// the route guard admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Organization,
    Doctor,
    Patient,
}

impl Role {
    /// String form used in durable session storage and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Default landing page for this role.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Organization => "/organization/dashboard",
            Self::Doctor => "/doctor/dashboard",
            Self::Patient => "/patient/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organization" => Ok(Self::Organization),
            "doctor" => Ok(Self::Doctor),
            "patient" => Ok(Self::Patient),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Raised when a stored or user-supplied role string is not one of the three
/// known roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}
