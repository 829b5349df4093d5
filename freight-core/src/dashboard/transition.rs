use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiError;
use crate::models::{BookingDraft, BookingReceipt, PriceEstimate, TrackingRecord};

use super::form::FieldName;
use super::state::{DashboardState, ErrorNotice, Notice, Operation, QuotedEstimate, RequestId, Tab};

/// How responses that resolve out of issue order are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsePolicy {
    /// Apply every response as it arrives; the last one to arrive wins.
    #[default]
    LastArrival,
    /// Drop a response older than one already applied for the same
    /// operation.
    LatestRequest,
}

impl ResponsePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastArrival => "last-arrival",
            Self::LatestRequest => "latest-request",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "last-arrival" => Some(Self::LastArrival),
            "latest-request" => Some(Self::LatestRequest),
            _ => None,
        }
    }

    /// Whether a response for `request` may still be applied.
    fn accepts(
        &self,
        request: RequestId,
        newest_applied: Option<RequestId>,
    ) -> bool {
        match self {
            Self::LastArrival => true,
            Self::LatestRequest => newest_applied.is_none_or(|newest| request > newest),
        }
    }
}

impl fmt::Display for ResponsePolicy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way the dashboard state can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectTab(Tab),
    UpdateField {
        field: FieldName,
        value: String,
    },
    SetTrackingQuery(String),
    RequestStarted {
        operation: Operation,
        request: RequestId,
    },
    /// The form failed local checks; nothing was sent.
    ValidationFailed {
        operation: Operation,
        errors: Vec<String>,
    },
    EstimateResolved {
        request: RequestId,
        draft: BookingDraft,
        result: Result<PriceEstimate, ApiError>,
    },
    BookingResolved {
        request: RequestId,
        result: Result<BookingReceipt, ApiError>,
    },
    TrackingResolved {
        request: RequestId,
        result: Result<TrackingRecord, ApiError>,
    },
    DismissNotice,
    ClearError,
}

/// Apply one action to the dashboard state.
///
/// Pure apart from debug logging: the same state, action and policy always
/// produce the same result.
pub fn transition(
    state: DashboardState,
    action: Action,
    policy: ResponsePolicy,
) -> DashboardState {
    let mut next = state;

    match action {
        Action::SelectTab(tab) => next.active_tab = tab,
        Action::UpdateField { field, value } => next.form.set(field, value),
        Action::SetTrackingQuery(query) => next.tracking_query = query,
        Action::RequestStarted { operation, request } => {
            next.issued = next.issued.max(request.0);
            *next.in_flight.get_mut(operation) += 1;
        }
        Action::ValidationFailed { operation, errors } => {
            next.error = Some(ErrorNotice {
                operation,
                message: errors.join("; "),
            });
        }
        Action::EstimateResolved {
            request,
            draft,
            result,
        } => {
            if settle(&mut next, Operation::Estimate, request, policy) {
                match result {
                    Ok(estimate) => {
                        next.estimate = Some(QuotedEstimate { estimate, draft });
                        clear_error_for(&mut next, Operation::Estimate);
                    }
                    Err(error) => record_error(&mut next, Operation::Estimate, &error),
                }
            }
        }
        Action::BookingResolved { request, result } => {
            if settle(&mut next, Operation::Booking, request, policy) {
                match result {
                    Ok(receipt) => {
                        next.tracking_query = receipt.tracking_id.clone();
                        next.notice = Some(Notice::BookingConfirmed {
                            tracking_id: receipt.tracking_id,
                        });
                        clear_error_for(&mut next, Operation::Booking);
                    }
                    Err(error) => record_error(&mut next, Operation::Booking, &error),
                }
            }
        }
        Action::TrackingResolved { request, result } => {
            if settle(&mut next, Operation::Tracking, request, policy) {
                match result {
                    Ok(record) => {
                        next.tracking = Some(record);
                        clear_error_for(&mut next, Operation::Tracking);
                    }
                    Err(error) => record_error(&mut next, Operation::Tracking, &error),
                }
            }
        }
        Action::DismissNotice => next.notice = None,
        Action::ClearError => next.error = None,
    }

    next
}

/// Marks the request finished and reports whether its response applies.
fn settle(
    state: &mut DashboardState,
    operation: Operation,
    request: RequestId,
    policy: ResponsePolicy,
) -> bool {
    let in_flight = state.in_flight.get_mut(operation);
    *in_flight = in_flight.saturating_sub(1);

    let applied = state.applied.get_mut(operation);
    if !policy.accepts(request, *applied) {
        debug!(%operation, %request, "discarding response superseded by a newer request");
        return false;
    }
    *applied = Some(request);
    true
}

fn record_error(
    state: &mut DashboardState,
    operation: Operation,
    error: &ApiError,
) {
    state.error = Some(ErrorNotice {
        operation,
        message: error.to_string(),
    });
}

fn clear_error_for(
    state: &mut DashboardState,
    operation: Operation,
) {
    if state
        .error
        .as_ref()
        .is_some_and(|error| error.operation == operation)
    {
        state.error = None;
    }
}
