//! # onc-config
//!
//! Layered configuration loading for the OnControl client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ONCONTROL_*` prefix, `__` as separator)
//! 2. Project-level `.oncontrol/config.toml`
//! 3. User-level `~/.config/oncontrol/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ONCONTROL_API__BASE_URL` -> `api.base_url`,
//! `ONCONTROL_EDGE__BASE_URL` -> `edge.base_url`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use onc_config::OncConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = OncConfig::load_with_dotenv().expect("config");
//!
//! if config.api.is_configured() {
//!     println!("backend: {}", config.api.base_url);
//! }
//! ```

mod api;
mod edge;
mod error;
mod general;

pub use api::ApiConfig;
pub use edge::EdgeConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OncConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub edge: EdgeConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl OncConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads the nearest `.env` before building the figment. This is the
    /// typical entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".oncontrol/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("ONCONTROL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("oncontrol").join("config.toml"))
    }

    /// Load `.env` from the current directory or an ancestor.
    ///
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
