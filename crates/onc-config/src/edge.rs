//! Edge vitals service configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EdgeConfig {
    /// Base URL of the edge vitals service.
    #[serde(default)]
    pub base_url: String,
}

impl EdgeConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}
