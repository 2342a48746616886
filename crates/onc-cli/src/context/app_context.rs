//! Shared application context for command handlers.

use std::time::Duration;

use anyhow::Context;

use onc_api::PlatformClient;
use onc_auth::{AuthGateway, SessionStore};
use onc_config::OncConfig;
use onc_edge::EdgeClient;

/// Everything a command handler needs: configuration, the hydrated session
/// store, and constructors for the HTTP clients.
pub struct AppContext {
    pub config: OncConfig,
    pub session: SessionStore,
}

impl AppContext {
    /// Build the context and run the session store's one-time hydration.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be resolved.
    pub fn init(config: OncConfig) -> anyhow::Result<Self> {
        let session = SessionStore::new().context("failed to open the session store")?;
        session.load_from_disk();
        Ok(Self { config, session })
    }

    /// Gateway against the configured platform backend.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend URL is configured.
    pub fn gateway(&self) -> anyhow::Result<AuthGateway> {
        Ok(AuthGateway::with_client(
            self.http_client()?,
            self.api_base_url()?,
        ))
    }

    /// Platform client for the given session token.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend URL is configured.
    pub fn platform(&self, token: &str) -> anyhow::Result<PlatformClient> {
        Ok(PlatformClient::with_client(
            self.http_client()?,
            self.api_base_url()?,
            token,
        ))
    }

    /// Edge vitals client for the given session token.
    ///
    /// # Errors
    ///
    /// Returns an error if no edge service URL is configured.
    pub fn edge(&self, token: &str) -> anyhow::Result<EdgeClient> {
        if !self.config.edge.is_configured() {
            anyhow::bail!("ONCONTROL_EDGE__BASE_URL is not configured");
        }
        Ok(EdgeClient::with_client(
            self.http_client()?,
            self.config.edge.base_url.clone(),
            token,
        ))
    }

    /// Result limit for list commands: `--limit` wins over the configured
    /// default.
    #[must_use]
    pub fn limit(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.config.general.default_limit)
    }

    fn api_base_url(&self) -> anyhow::Result<String> {
        if !self.config.api.is_configured() {
            anyhow::bail!("ONCONTROL_API__BASE_URL is not configured");
        }
        Ok(self.config.api.base_url.clone())
    }

    fn http_client(&self) -> anyhow::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.api.timeout_secs))
            .build()
            .context("failed to build HTTP client")
    }
}
