//! Dashboard settings: an optional TOML file, then command-line overrides.
//!
//! ```toml
//! [api]
//! backend = "http"
//! base_url = "http://localhost:4000"
//! timeout_secs = 10
//!
//! [dashboard]
//! response_policy = "latest-request"
//!
//! [logging]
//! level = "debug"
//! file = "dashboard.log"
//! ```

use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use freight_core::{ClientConfig, ResponsePolicy};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api: ApiSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiSettings {
    pub backend: String,
    pub base_url: String,
    /// Zero or absent disables the timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            backend: client.backend,
            base_url: client.base_url,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardSettings {
    pub response_policy: ResponsePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Values given on the command line; each `Some` replaces the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub backend: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub response_policy: Option<ResponsePolicy>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid settings file '{}'", path.display()))
    }

    pub fn apply(
        &mut self,
        overrides: Overrides,
    ) {
        if let Some(backend) = overrides.backend {
            self.api.backend = backend;
        }
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.api.timeout_secs = Some(timeout_secs);
        }
        if let Some(policy) = overrides.response_policy {
            self.dashboard.response_policy = policy;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            backend: self.api.backend.clone(),
            base_url: self.api.base_url.clone(),
            timeout: self
                .api
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}
