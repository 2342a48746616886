//! Doctor registration and lookup.
//!
//! Doctors are registered by their organization; the backend enforces the
//! capacity quota and answers with the stored profile.

use serde::Serialize;

use onc_core::identity::DoctorProfile;

use crate::client::PlatformClient;
use crate::error::ApiError;

/// Fields for registering a doctor under an organization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    pub license_number: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PlatformClient {
    /// Register a doctor under `organization_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status
    /// (including quota exhaustion, which the backend reports as a 409).
    pub async fn register_doctor(
        &self,
        organization_id: i64,
        doctor: &NewDoctor,
    ) -> Result<DoctorProfile, ApiError> {
        let resp = self
            .post(&format!("/organizations/{organization_id}/doctors"))
            .json(doctor)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// List an organization's doctors, optionally filtered by specialization.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn list_doctors(
        &self,
        organization_id: i64,
        specialization: Option<&str>,
        limit: u32,
    ) -> Result<Vec<DoctorProfile>, ApiError> {
        let mut path = format!("/organizations/{organization_id}/doctors?limit={limit}");
        if let Some(specialization) = specialization {
            path.push_str(&format!(
                "&specialization={}",
                urlencoding::encode(specialization)
            ));
        }
        let resp = self.get(&path).send().await?;
        Self::decode(resp).await
    }

    /// Fetch one doctor by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn get_doctor(&self, id: i64) -> Result<DoctorProfile, ApiError> {
        let resp = self.get(&format!("/doctors/{id}")).send().await?;
        Self::decode(resp).await
    }

    /// Flip whether a doctor accepts new appointments.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-success status.
    pub async fn set_doctor_availability(
        &self,
        id: i64,
        available: bool,
    ) -> Result<DoctorProfile, ApiError> {
        let resp = self
            .patch(&format!("/doctors/{id}/availability"))
            .json(&serde_json::json!({ "available": available }))
            .send()
            .await?;
        Self::decode(resp).await
    }
}
