use std::time::Duration;

use async_trait::async_trait;
use freight_core::{
    ApiError, BookingApi, BookingDraft, BookingReceipt, PriceEstimate, TrackingRecord,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// [`BookingApi`] over HTTP/JSON.
///
/// No authentication header is sent. Any non-2xx response is an
/// [`ApiError::Status`].
#[derive(Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: Url,
}

impl HttpBookingApi {
    /// `base_url` may carry a path prefix (`http://host/freight`); endpoint
    /// paths are appended to it.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Configuration(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(
        &self,
        segments: &[&str],
    ) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Configuration(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            debug!(error = %e, "request could not be sent");
            if e.is_decode() {
                ApiError::Decode(e.to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        debug!(url = %response.url(), %status, "response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn estimate_price(&self, draft: &BookingDraft) -> Result<PriceEstimate, ApiError> {
        let url = self.endpoint(&["api", "estimate-price"])?;
        self.execute(self.client.post(url).json(draft)).await
    }

    async fn book_vehicle(&self, draft: &BookingDraft) -> Result<BookingReceipt, ApiError> {
        let url = self.endpoint(&["api", "book-vehicle"])?;
        self.execute(self.client.post(url).json(draft)).await
    }

    async fn track_shipment(&self, tracking_id: &str) -> Result<TrackingRecord, ApiError> {
        let url = self.endpoint(&["api", "track", tracking_id])?;
        self.execute(self.client.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpBookingApi {
        HttpBookingApi::new(base, None).unwrap()
    }

    #[test]
    fn endpoints_append_to_bare_host() {
        let url = api("http://localhost:4000")
            .endpoint(&["api", "estimate-price"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/estimate-price");
    }

    #[test]
    fn endpoints_keep_path_prefix_and_ignore_trailing_slash() {
        let url = api("http://gateway.local/freight/")
            .endpoint(&["api", "book-vehicle"])
            .unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/freight/api/book-vehicle");
    }

    #[test]
    fn tracking_id_is_encoded_as_single_segment() {
        let url = api("http://localhost:4000")
            .endpoint(&["api", "track", "T 1/2"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4000/api/track/T%201%2F2");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            HttpBookingApi::new("not a url", None),
            Err(ApiError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_base_url_without_path() {
        assert!(matches!(
            HttpBookingApi::new("mailto:dispatch@example.com", None),
            Err(ApiError::Configuration(_))
        ));
    }
}
