use std::time::Duration;

use async_trait::async_trait;

use super::client::{ApiError, BookingApi};

/// Base URL the dashboard talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Backend-agnostic client configuration.
///
/// `backend` names a registered [`ClientFactory`]; blank means the first one
/// registered. `base_url` and `timeout` are passed through unchanged.
///
/// | backend | base_url example          |
/// |---------|---------------------------|
/// | `http`  | `http://localhost:4000`   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Builds a [`BookingApi`] for one transport. Backend crates export a unit
/// struct implementing this trait.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Lowercase name matched against [`ClientConfig::backend`].
    fn backend_name(&self) -> &'static str;

    async fn create(&self, config: &ClientConfig) -> Result<Box<dyn BookingApi>, ApiError>;
}

/// Backends this build can talk to, in registration order.
///
/// The first registered backend is used when the configured name is blank.
#[derive(Default)]
pub struct ClientRegistry {
    factories: Vec<Box<dyn ClientFactory>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a backend. A backend with the same name is replaced in place.
    pub fn register(
        &mut self,
        factory: Box<dyn ClientFactory>,
    ) {
        match self
            .factories
            .iter_mut()
            .find(|existing| existing.backend_name() == factory.backend_name())
        {
            Some(slot) => *slot = factory,
            None => self.factories.push(factory),
        }
    }

    pub fn backends(&self) -> Vec<&'static str> {
        self.factories.iter().map(|f| f.backend_name()).collect()
    }

    /// Build the client named by `config.backend` (case-insensitive).
    pub async fn create(&self, config: &ClientConfig) -> Result<Box<dyn BookingApi>, ApiError> {
        let wanted = config.backend.trim();
        let factory = if wanted.is_empty() {
            self.factories.first()
        } else {
            self.factories
                .iter()
                .find(|f| f.backend_name().eq_ignore_ascii_case(wanted))
        };
        let factory = factory.ok_or_else(|| {
            ApiError::Configuration(format!(
                "no booking client backend named '{wanted}' (available: {})",
                self.backends().join(", ")
            ))
        })?;

        factory.create(config).await
    }
}
