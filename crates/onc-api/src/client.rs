//! The authenticated platform client.

use crate::error::ApiError;

/// HTTP client for the OnControl backend.
///
/// Carries the session token read-through from the session store; this crate
/// never writes the session key space. Resource operations live in
/// [`crate::doctors`], [`crate::patients`], and [`crate::appointments`].
#[derive(Debug, Clone)]
pub struct PlatformClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl PlatformClient {
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

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    pub(crate) fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .patch(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
    }

    /// Decode a checked response body.
    pub(crate) async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let resp = crate::http::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}
