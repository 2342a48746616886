//! Appointment listing and creation.

use chrono::{DateTime, Utc};
use serde::Serialize;

use onc_core::entities::Appointment;

use crate::client::PlatformClient;
use crate::error::ApiError;

/// Fields for scheduling an appointment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PlatformClient {
    /// List a doctor's appointments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn list_doctor_appointments(
        &self,
        doctor_id: i64,
        limit: u32,
    ) -> Result<Vec<Appointment>, ApiError> {
        let resp = self
            .get(&format!("/doctors/{doctor_id}/appointments?limit={limit}"))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// List a patient's appointments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn list_patient_appointments(
        &self,
        patient_id: i64,
        limit: u32,
    ) -> Result<Vec<Appointment>, ApiError> {
        let resp = self
            .get(&format!("/patients/{patient_id}/appointments?limit={limit}"))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Schedule an appointment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status
    /// (an unavailable doctor is reported as a 409).
    pub async fn create_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, ApiError> {
        let resp = self.post("/appointments").json(appointment).send().await?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appointment_serializes_camel_case() {
        let appointment = NewAppointment {
            doctor_id: 7,
            patient_id: 19,
            scheduled_at: "2026-08-10T15:30:00Z".parse().expect("timestamp"),
            location: Some("Consultorio 4".into()),
            notes: None,
        };
        let json = serde_json::to_value(&appointment).expect("serialize");
        assert_eq!(json["doctorId"], 7);
        assert_eq!(json["scheduledAt"], "2026-08-10T15:30:00Z");
        assert!(json.get("notes").is_none());
    }
}
