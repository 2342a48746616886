//! Domain entities returned by the platform REST API.
//!
//! Enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! matching the backend's JSON conventions.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doctor–patient appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    pub patient_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&AppointmentStatus::Scheduled).expect("serialize");
        assert_eq!(json, "\"scheduled\"");
    }

    #[test]
    fn appointment_round_trips() {
        let appointment = Appointment {
            id: 42,
            doctor_id: 7,
            patient_id: 19,
            scheduled_at: "2026-08-10T15:30:00Z".parse().expect("timestamp"),
            status: AppointmentStatus::Scheduled,
            location: Some("Consultorio 4".into()),
            notes: None,
        };
        let json = serde_json::to_string(&appointment).expect("serialize");
        assert!(json.contains("\"scheduledAt\""));
        let back: Appointment = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, appointment);
    }
}
