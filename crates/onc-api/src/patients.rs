//! Patient registration and lookup.
//!
//! Patients are registered by their treating doctor; the registering
//! doctor's id becomes the patient's `doctor_id` reference.

use serde::Serialize;

use onc_core::identity::PatientProfile;

use crate::client::PlatformClient;
use crate::error::ApiError;

/// Fields for registering a patient under a doctor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PlatformClient {
    /// Register a patient under `doctor_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn register_patient(
        &self,
        doctor_id: i64,
        patient: &NewPatient,
    ) -> Result<PatientProfile, ApiError> {
        let resp = self
            .post(&format!("/doctors/{doctor_id}/patients"))
            .json(patient)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// List a doctor's patients.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn list_patients(
        &self,
        doctor_id: i64,
        limit: u32,
    ) -> Result<Vec<PatientProfile>, ApiError> {
        let resp = self
            .get(&format!("/doctors/{doctor_id}/patients?limit={limit}"))
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Fetch one patient by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn get_patient(&self, id: i64) -> Result<PatientProfile, ApiError> {
        let resp = self.get(&format!("/patients/{id}")).send().await?;
        Self::decode(resp).await
    }
}
