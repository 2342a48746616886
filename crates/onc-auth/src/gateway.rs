//! Authentication gateway: the network round trips for login, organization
//! self-registration, and logout.
//!
//! This client performs HTTP only. Normalization lives in
//! [`crate::normalize`], persistence in [`crate::session`] — neither happens
//! here, and no local storage is touched.

use serde::Serialize;
use serde_json::Value;

use crate::error::AuthError;

/// Thin reqwest client over the three identity-bearing endpoints.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl AuthGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Exchange credentials for a raw identity payload.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] on a 400-class response;
    /// - [`AuthError::NetworkUnavailable`] on transport failure or a
    ///   non-credential server error — distinguishable so the UI can suggest
    ///   a connectivity check instead of a password retry.
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, AuthError> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::NetworkUnavailable(format!("login: {e}")))?;

        let status = resp.status();
        if status.is_client_error() {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::NetworkUnavailable(format!("login: HTTP {status}")));
        }

        resp.json()
            .await
            .map_err(|e| AuthError::NetworkUnavailable(format!("parse login response: {e}")))
    }

    /// Self-register an organization account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] with field-level issues on a 400-class
    ///   response (duplicate email, malformed fields);
    /// - [`AuthError::NetworkUnavailable`] on transport or server failure.
    pub async fn register_organization(
        &self,
        registration: &OrganizationRegistration,
    ) -> Result<Value, AuthError> {
        let url = format!("{}/auth/register/organization", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(registration)
            .send()
            .await
            .map_err(|e| AuthError::NetworkUnavailable(format!("register: {e}")))?;

        let status = resp.status();
        if status.is_client_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::Validation {
                issues: parse_validation_issues(&body),
            });
        }
        if !status.is_success() {
            return Err(AuthError::NetworkUnavailable(format!(
                "register: HTTP {status}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| AuthError::NetworkUnavailable(format!("parse register response: {e}")))
    }

    /// Notify the backend that this session is over.
    ///
    /// Best-effort by contract: callers tearing down a session treat a
    /// failure here as advisory and clear local state regardless.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NetworkUnavailable`] if the notification did not
    /// reach the backend.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/logout", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::NetworkUnavailable(format!("logout: {e}")))?;

        if !resp.status().is_success() {
            return Err(AuthError::NetworkUnavailable(format!(
                "logout: HTTP {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Fields for organization self-registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRegistration {
    pub email: String,
    pub password: String,
    pub organization_name: String,
    pub country: String,
    pub city: String,
}

/// Pull field-level messages out of a rejection body.
///
/// The backend answers either `{"errors": ["..."]}` or `{"message": "..."}`;
/// an unreadable body degrades to itself as the single issue.
fn parse_validation_issues(body: &str) -> Vec<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            let issues: Vec<String> = errors
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if !issues.is_empty() {
                return issues;
            }
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return vec![message.to_string()];
        }
    }
    vec![body.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_issues_from_errors_array() {
        let issues = parse_validation_issues(r#"{"errors": ["email already registered", "city is required"]}"#);
        assert_eq!(issues, vec!["email already registered", "city is required"]);
    }

    #[test]
    fn validation_issues_from_message() {
        let issues = parse_validation_issues(r#"{"message": "email already registered"}"#);
        assert_eq!(issues, vec!["email already registered"]);
    }

    #[test]
    fn validation_issues_from_opaque_body() {
        let issues = parse_validation_issues("Bad Request");
        assert_eq!(issues, vec!["Bad Request"]);
    }

    #[test]
    fn registration_serializes_camel_case() {
        let registration = OrganizationRegistration {
            email: "org@example.com".into(),
            password: "secret".into(),
            organization_name: "Clínica Norte".into(),
            country: "MX".into(),
            city: "Monterrey".into(),
        };
        let json = serde_json::to_value(&registration).expect("serialize");
        assert_eq!(json["organizationName"], "Clínica Norte");
        assert!(json.get("organization_name").is_none());
    }
}
