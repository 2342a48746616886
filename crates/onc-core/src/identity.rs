use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// The authenticated principal, tagged by role.
///
/// Produced exactly once by the identity normalizer at the authentication
/// boundary. Downstream code matches on the variant instead of re-inspecting
/// field presence, so cross-role fields cannot leak: each variant carries
/// only its own record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Identity {
    Organization(OrganizationIdentity),
    Doctor(DoctorIdentity),
    Patient(PatientIdentity),
}

impl Identity {
    /// Role tag of this identity.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Organization(_) => Role::Organization,
            Self::Doctor(_) => Role::Doctor,
            Self::Patient(_) => Role::Patient,
        }
    }

    /// Session token issued by the backend at login.
    ///
    /// Non-empty for any identity the normalizer accepts; losing it
    /// invalidates the session.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Organization(org) => &org.token,
            Self::Doctor(doc) => &doc.token,
            Self::Patient(pat) => &pat.token,
        }
    }

    /// Default landing page for this identity's role.
    #[must_use]
    pub const fn dashboard_path(&self) -> &'static str {
        self.role().dashboard_path()
    }
}

/// An organization account: registers doctors and owns capacity quotas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationIdentity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub active: bool,
    pub email_verified: bool,
    /// How many doctors this organization may still register.
    pub doctor_quota: u32,
    /// How many patients this organization's doctors may carry in total.
    pub patient_quota: u32,
    pub token: String,
}

/// A doctor account. The profile is the server-side record; the token is the
/// session credential issued alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DoctorIdentity {
    pub profile: DoctorProfile,
    pub token: String,
}

/// Server-side doctor record.
///
/// `organization_id` references the organization that granted this doctor —
/// established server-side, opaque to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: i64,
    pub organization_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub license_number: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the doctor currently accepts new appointments.
    pub available: bool,
}

/// A patient account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatientIdentity {
    pub profile: PatientProfile,
    pub token: String,
}

/// Server-side patient record.
///
/// `doctor_id` references the doctor that registered this patient — opaque
/// to the client, like `DoctorProfile::organization_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: i64,
    pub doctor_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_stage: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
