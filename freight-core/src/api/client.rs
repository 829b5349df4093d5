use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BookingDraft, BookingReceipt, PriceEstimate, TrackingRecord};

/// Failure of a single call to the booking service.
///
/// Transport failures and non-2xx responses both read as "request failed";
/// the status code is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request failed: server responded with {status}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("client configuration error: {0}")]
    Configuration(String),
}

/// The three calls the dashboard makes against the booking service.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `POST /api/estimate-price`
    async fn estimate_price(&self, draft: &BookingDraft) -> Result<PriceEstimate, ApiError>;

    /// `POST /api/book-vehicle`
    async fn book_vehicle(&self, draft: &BookingDraft) -> Result<BookingReceipt, ApiError>;

    /// `GET /api/track/{tracking_id}`
    async fn track_shipment(&self, tracking_id: &str) -> Result<TrackingRecord, ApiError>;
}
