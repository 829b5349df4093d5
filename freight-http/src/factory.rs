use async_trait::async_trait;
use freight_core::{ApiError, BookingApi, ClientConfig, ClientFactory};

use crate::client::HttpBookingApi;

/// [`ClientFactory`] for the `"http"` backend.
///
/// ```rust,no_run
/// use freight_core::ClientRegistry;
/// use freight_http::HttpClientFactory;
///
/// let mut registry = ClientRegistry::new();
/// registry.register(Box::new(HttpClientFactory));
/// ```
pub struct HttpClientFactory;

#[async_trait]
impl ClientFactory for HttpClientFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(&self, config: &ClientConfig) -> Result<Box<dyn BookingApi>, ApiError> {
        let api = HttpBookingApi::new(&config.base_url, config.timeout)?;
        Ok(Box::new(api))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use freight_core::{ApiError, ClientConfig, ClientFactory};

    use super::HttpClientFactory;

    #[test]
    fn backend_name_is_http() {
        assert_eq!(HttpClientFactory.backend_name(), "http");
    }

    #[tokio::test]
    async fn creates_client_for_default_config() {
        let result = HttpClientFactory.create(&ClientConfig::default()).await;
        assert!(result.is_ok(), "failed to create client: {:?}", result.err());
    }

    #[tokio::test]
    async fn creates_client_with_timeout() {
        let config = ClientConfig {
            timeout: Some(Duration::from_secs(5)),
            ..ClientConfig::default()
        };
        assert!(HttpClientFactory.create(&config).await.is_ok());
    }

    #[tokio::test]
    async fn bad_base_url_is_configuration_error() {
        let config = ClientConfig {
            base_url: "::nope::".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpClientFactory.create(&config).await,
            Err(ApiError::Configuration(_))
        ));
    }
}
