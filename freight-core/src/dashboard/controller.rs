use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use crate::api::BookingApi;
use crate::models::{BookingDraft, BookingReceipt, PriceEstimate, TrackingRecord};

use super::error::DashboardError;
use super::form::{FieldName, validate_tracking_query};
use super::state::{DashboardState, Operation, RequestId, Tab};
use super::transition::{Action, ResponsePolicy, transition};

/// A request already validated and stamped, waiting to be sent.
pub type PendingRequest<T> = Pin<Box<dyn Future<Output = Result<T, DashboardError>> + Send>>;

/// Drives the dashboard: owns the view state and issues requests through an
/// injected [`BookingApi`].
///
/// All methods take `&self`. The state lock is released before any request
/// is awaited, so estimate, booking and tracking calls may overlap; how
/// out-of-order responses land is decided by the [`ResponsePolicy`].
pub struct Dashboard {
    api: Arc<dyn BookingApi>,
    policy: ResponsePolicy,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self {
            api,
            policy: ResponsePolicy::default(),
            state: Mutex::new(DashboardState::default()),
        }
    }

    pub fn with_policy(
        mut self,
        policy: ResponsePolicy,
    ) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> DashboardState {
        self.lock().clone()
    }

    pub fn select_tab(
        &self,
        tab: Tab,
    ) {
        self.dispatch(Action::SelectTab(tab));
    }

    /// Merge one form field, addressed by its service name
    /// (e.g. `pickupLocation`).
    pub fn update_field(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DashboardError> {
        let field =
            FieldName::parse(name).ok_or_else(|| DashboardError::UnknownField(name.to_string()))?;
        self.dispatch(Action::UpdateField {
            field,
            value: value.into(),
        });
        Ok(())
    }

    pub fn set_tracking_query(
        &self,
        query: impl Into<String>,
    ) {
        self.dispatch(Action::SetTrackingQuery(query.into()));
    }

    pub fn dismiss_notice(&self) {
        self.dispatch(Action::DismissNotice);
    }

    pub fn clear_error(&self) {
        self.dispatch(Action::ClearError);
    }

    /// Price the current form. A failure leaves the previous estimate in
    /// place.
    pub async fn calculate_estimate(&self) -> Result<PriceEstimate, DashboardError> {
        let (request, draft) = self.begin(Operation::Estimate, |state| state.form.validate())?;
        self.send_estimate(request, draft).await
    }

    /// Book the current form. On success the returned tracking ID becomes
    /// the tracking query and a confirmation is raised.
    pub async fn submit_booking(&self) -> Result<BookingReceipt, DashboardError> {
        let (request, draft) = self.begin(Operation::Booking, |state| state.form.validate())?;
        self.send_booking(request, draft).await
    }

    /// Fetch the shipment named by the tracking query. A failure leaves the
    /// previous record displayed.
    pub async fn submit_tracking(&self) -> Result<TrackingRecord, DashboardError> {
        let (request, tracking_id) = self.begin(Operation::Tracking, |state| {
            validate_tracking_query(&state.tracking_query)
        })?;
        self.send_tracking(request, tracking_id).await
    }

    /// Like [`calculate_estimate`](Self::calculate_estimate), but the form is
    /// read now and only the send is deferred to the returned future.
    pub fn start_estimate(
        self: &Arc<Self>,
    ) -> Result<PendingRequest<PriceEstimate>, DashboardError> {
        let (request, draft) = self.begin(Operation::Estimate, |state| state.form.validate())?;
        let this = Arc::clone(self);
        Ok(Box::pin(async move { this.send_estimate(request, draft).await }))
    }

    pub fn start_booking(
        self: &Arc<Self>,
    ) -> Result<PendingRequest<BookingReceipt>, DashboardError> {
        let (request, draft) = self.begin(Operation::Booking, |state| state.form.validate())?;
        let this = Arc::clone(self);
        Ok(Box::pin(async move { this.send_booking(request, draft).await }))
    }

    pub fn start_tracking(
        self: &Arc<Self>,
    ) -> Result<PendingRequest<TrackingRecord>, DashboardError> {
        let (request, tracking_id) = self.begin(Operation::Tracking, |state| {
            validate_tracking_query(&state.tracking_query)
        })?;
        let this = Arc::clone(self);
        Ok(Box::pin(async move { this.send_tracking(request, tracking_id).await }))
    }

    async fn send_estimate(
        &self,
        request: RequestId,
        draft: BookingDraft,
    ) -> Result<PriceEstimate, DashboardError> {
        let operation = Operation::Estimate;
        debug!(%request, ?draft, "requesting price estimate");
        let result = self.api.estimate_price(&draft).await;
        log_outcome(operation, request, &result);

        self.dispatch(Action::EstimateResolved {
            request,
            draft,
            result: result.clone(),
        });
        result.map_err(|source| DashboardError::Api { operation, source })
    }

    async fn send_booking(
        &self,
        request: RequestId,
        draft: BookingDraft,
    ) -> Result<BookingReceipt, DashboardError> {
        let operation = Operation::Booking;
        debug!(%request, ?draft, "submitting booking");
        let result = self.api.book_vehicle(&draft).await;
        log_outcome(operation, request, &result);
        if let Ok(receipt) = &result {
            info!(tracking_id = %receipt.tracking_id, "booking confirmed");
        }

        self.dispatch(Action::BookingResolved {
            request,
            result: result.clone(),
        });
        result.map_err(|source| DashboardError::Api { operation, source })
    }

    async fn send_tracking(
        &self,
        request: RequestId,
        tracking_id: String,
    ) -> Result<TrackingRecord, DashboardError> {
        let operation = Operation::Tracking;
        debug!(%request, %tracking_id, "tracking shipment");
        let result = self.api.track_shipment(&tracking_id).await;
        log_outcome(operation, request, &result);

        self.dispatch(Action::TrackingResolved {
            request,
            result: result.clone(),
        });
        result.map_err(|source| DashboardError::Api { operation, source })
    }

    /// Validate and stamp a request under a single lock, so the payload and
    /// its request ID describe the same state.
    fn begin<T>(
        &self,
        operation: Operation,
        prepare: impl FnOnce(&DashboardState) -> Result<T, Vec<String>>,
    ) -> Result<(RequestId, T), DashboardError> {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);

        match prepare(&state) {
            Ok(payload) => {
                let request = state.next_request_id();
                *guard = transition(state, Action::RequestStarted { operation, request }, self.policy);
                Ok((request, payload))
            }
            Err(errors) => {
                warn!(%operation, ?errors, "request not sent: form is incomplete");
                *guard = transition(
                    state,
                    Action::ValidationFailed {
                        operation,
                        errors: errors.clone(),
                    },
                    self.policy,
                );
                Err(DashboardError::Validation { operation, errors })
            }
        }
    }

    fn dispatch(
        &self,
        action: Action,
    ) {
        let mut guard = self.lock();
        let state = std::mem::take(&mut *guard);
        *guard = transition(state, action, self.policy);
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_outcome<T, E: std::fmt::Display>(
    operation: Operation,
    request: RequestId,
    result: &Result<T, E>,
) {
    match result {
        Ok(_) => debug!(%operation, %request, "request succeeded"),
        Err(e) => error!(%operation, %request, error = %e, "{}", operation.failure_message()),
    }
}
