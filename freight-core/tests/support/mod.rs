//! Stub [`BookingApi`] implementations shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use freight_core::{
    ApiError, BookingApi, BookingDraft, BookingReceipt, PriceEstimate, TrackingRecord,
    VehicleType,
};
use rust_decimal_macros::dec;
use tokio::sync::{mpsc, oneshot};

/// A call the stub received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Estimate(BookingDraft),
    Book(BookingDraft),
    Track(String),
}

/// Answers every call with a canned response and records what it was sent.
pub struct RecordingApi {
    pub calls: Mutex<Vec<Call>>,
    pub estimate: Mutex<Result<PriceEstimate, ApiError>>,
    pub booking: Mutex<Result<BookingReceipt, ApiError>>,
    pub tracking: Mutex<Result<TrackingRecord, ApiError>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            estimate: Mutex::new(Ok(PriceEstimate { price: dec!(125.50) })),
            booking: Mutex::new(Ok(BookingReceipt {
                tracking_id: "T123".to_string(),
            })),
            tracking: Mutex::new(Ok(sample_record("In Transit"))),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_estimates_with(
        &self,
        error: ApiError,
    ) {
        *self.estimate.lock().unwrap() = Err(error);
    }

    pub fn fail_tracking_with(
        &self,
        error: ApiError,
    ) {
        *self.tracking.lock().unwrap() = Err(error);
    }

    pub fn fail_bookings_with(
        &self,
        error: ApiError,
    ) {
        *self.booking.lock().unwrap() = Err(error);
    }
}

#[async_trait]
impl BookingApi for RecordingApi {
    async fn estimate_price(&self, draft: &BookingDraft) -> Result<PriceEstimate, ApiError> {
        self.calls.lock().unwrap().push(Call::Estimate(draft.clone()));
        self.estimate.lock().unwrap().clone()
    }

    async fn book_vehicle(&self, draft: &BookingDraft) -> Result<BookingReceipt, ApiError> {
        self.calls.lock().unwrap().push(Call::Book(draft.clone()));
        self.booking.lock().unwrap().clone()
    }

    async fn track_shipment(&self, tracking_id: &str) -> Result<TrackingRecord, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Track(tracking_id.to_string()));
        self.tracking.lock().unwrap().clone()
    }
}

type Gate = oneshot::Receiver<Result<TrackingRecord, ApiError>>;

/// Tracking stub whose responses are released by the test, one tracking ID
/// at a time. Each received ID is reported on `received` before the stub
/// waits for its release.
pub struct GatedTrackingApi {
    gates: Mutex<HashMap<String, Gate>>,
    received: mpsc::UnboundedSender<String>,
}

/// Test-side handle for a [`GatedTrackingApi`].
pub struct Gates {
    releases: HashMap<String, oneshot::Sender<Result<TrackingRecord, ApiError>>>,
    pub received: mpsc::UnboundedReceiver<String>,
}

impl Gates {
    pub fn release(
        &mut self,
        tracking_id: &str,
        response: Result<TrackingRecord, ApiError>,
    ) {
        let sender = self
            .releases
            .remove(tracking_id)
            .expect("gate already released");
        sender.send(response).expect("stub stopped waiting");
    }
}

impl GatedTrackingApi {
    pub fn new(tracking_ids: &[&str]) -> (Self, Gates) {
        let mut gates = HashMap::new();
        let mut releases = HashMap::new();
        for id in tracking_ids {
            let (tx, rx) = oneshot::channel();
            gates.insert(id.to_string(), rx);
            releases.insert(id.to_string(), tx);
        }
        let (received_tx, received_rx) = mpsc::unbounded_channel();
        (
            Self {
                gates: Mutex::new(gates),
                received: received_tx,
            },
            Gates {
                releases,
                received: received_rx,
            },
        )
    }
}

#[async_trait]
impl BookingApi for GatedTrackingApi {
    async fn estimate_price(&self, _draft: &BookingDraft) -> Result<PriceEstimate, ApiError> {
        Err(ApiError::Transport("not used".to_string()))
    }

    async fn book_vehicle(&self, _draft: &BookingDraft) -> Result<BookingReceipt, ApiError> {
        Err(ApiError::Transport("not used".to_string()))
    }

    async fn track_shipment(&self, tracking_id: &str) -> Result<TrackingRecord, ApiError> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(tracking_id)
            .expect("no gate for tracking id");
        self.received.send(tracking_id.to_string()).unwrap();
        gate.await.expect("gate dropped")
    }
}

pub fn sample_record(status: &str) -> TrackingRecord {
    TrackingRecord {
        status: status.to_string(),
        current_location: "Birmingham depot".to_string(),
        driver_name: "Priya Natarajan".to_string(),
        estimated_delivery: "2026-10-22".to_string(),
    }
}

pub fn sample_draft() -> BookingDraft {
    BookingDraft {
        pickup_location: "A".to_string(),
        dropoff_location: "B".to_string(),
        vehicle_type: VehicleType::Van,
        goods_type: "boxes".to_string(),
        weight: dec!(10),
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}
