//! The authenticated edge service client.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::EdgeError;
use crate::readings::{VitalsReading, merge_readings};

/// A device claimed for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceClaim {
    pub device_id: String,
    pub patient_id: i64,
    pub claimed_at: DateTime<Utc>,
}

/// HTTP client for the edge vitals service.
///
/// Authenticates with the same session token as the platform backend,
/// read through from the session store. Read-mostly: the only write is the
/// device claim.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl EdgeClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, token)
    }

    /// Use a preconfigured client (timeouts, proxies).
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Claim a device for a patient. Readings the device uploads from now
    /// on are attributed to that patient.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError`] on transport failure or a non-success status.
    pub async fn claim_device(
        &self,
        device_id: &str,
        patient_id: i64,
    ) -> Result<DeviceClaim, EdgeError> {
        let resp = self
            .client
            .post(format!("{}/devices/{device_id}/claim", self.base_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "patientId": patient_id }))
            .send()
            .await?;
        let resp = check(resp).await?;
        resp.json().await.map_err(|e| EdgeError::Parse(e.to_string()))
    }

    /// The most recent reading for a patient, if the device has reported.
    ///
    /// The edge service answers 204 when no reading exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError`] on transport failure or a non-success status.
    pub async fn latest_reading(
        &self,
        patient_id: i64,
    ) -> Result<Option<VitalsReading>, EdgeError> {
        let resp = self
            .client
            .get(format!(
                "{}/patients/{patient_id}/readings/latest",
                self.base_url
            ))
            .bearer_auth(&self.token)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let resp = check(resp).await?;
        resp.json()
            .await
            .map(Some)
            .map_err(|e| EdgeError::Parse(e.to_string()))
    }

    /// Full reading history for a patient, as stored by the edge service.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError`] on transport failure or a non-success status.
    pub async fn all_readings(&self, patient_id: i64) -> Result<Vec<VitalsReading>, EdgeError> {
        let resp = self
            .client
            .get(format!("{}/patients/{patient_id}/readings", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let resp = check(resp).await?;
        resp.json().await.map_err(|e| EdgeError::Parse(e.to_string()))
    }

    /// Merged timeline: history unioned with the point-in-time reading,
    /// newest first. This is what the vitals views render.
    ///
    /// # Errors
    ///
    /// Returns [`EdgeError`] if either underlying call fails.
    pub async fn timeline(&self, patient_id: i64) -> Result<Vec<VitalsReading>, EdgeError> {
        let history = self.all_readings(patient_id).await?;
        let latest = self.latest_reading(patient_id).await?;
        Ok(merge_readings(history, latest))
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, EdgeError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(EdgeError::Unauthorized);
    }
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %message, "edge service returned an error");
        return Err(EdgeError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}
