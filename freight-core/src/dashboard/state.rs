use std::fmt;

use crate::models::{BookingDraft, PriceEstimate, TrackingRecord};

use super::form::BookingForm;

/// The two dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Book,
    Track,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Book => "Book Vehicle",
            Self::Track => "Track Shipment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "book" => Some(Self::Book),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

/// The three network operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Estimate,
    Booking,
    Tracking,
}

impl Operation {
    /// Headline shown and logged when the operation fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Estimate => "Error calculating estimate",
            Self::Booking => "Error submitting booking",
            Self::Tracking => "Error tracking shipment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Estimate => "estimate",
            Self::Booking => "booking",
            Self::Tracking => "tracking",
        })
    }
}

/// Sequence number stamped on each outgoing request, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One value per [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerOperation<T> {
    pub estimate: T,
    pub booking: T,
    pub tracking: T,
}

impl<T> PerOperation<T> {
    pub fn get(
        &self,
        operation: Operation,
    ) -> &T {
        match operation {
            Operation::Estimate => &self.estimate,
            Operation::Booking => &self.booking,
            Operation::Tracking => &self.tracking,
        }
    }

    pub fn get_mut(
        &mut self,
        operation: Operation,
    ) -> &mut T {
        match operation {
            Operation::Estimate => &mut self.estimate,
            Operation::Booking => &mut self.booking,
            Operation::Tracking => &mut self.tracking,
        }
    }
}

/// A price together with the draft it was quoted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedEstimate {
    pub estimate: PriceEstimate,
    pub draft: BookingDraft,
}

impl QuotedEstimate {
    /// True once the form no longer describes the quoted draft.
    pub fn is_stale(
        &self,
        form: &BookingForm,
    ) -> bool {
        form.validate().map_or(true, |draft| draft != self.draft)
    }
}

/// Blocking confirmation; stays until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BookingConfirmed { tracking_id: String },
}

impl fmt::Display for Notice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::BookingConfirmed { tracking_id } => {
                write!(f, "Booking successful! Your tracking ID is: {tracking_id}")
            }
        }
    }
}

/// Most recent failure, kept until cleared or until the same operation
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub operation: Operation,
    pub message: String,
}

impl fmt::Display for ErrorNotice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.operation.failure_message(), self.message)
    }
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub form: BookingForm,
    pub estimate: Option<QuotedEstimate>,
    pub tracking_query: String,
    pub tracking: Option<TrackingRecord>,
    pub notice: Option<Notice>,
    pub error: Option<ErrorNotice>,
    /// Requests issued but not yet resolved.
    pub in_flight: PerOperation<usize>,
    /// Newest request whose response has been applied.
    pub applied: PerOperation<Option<RequestId>>,
    pub(crate) issued: u64,
}

impl DashboardState {
    /// Identifier the next outgoing request will carry.
    pub fn next_request_id(&self) -> RequestId {
        RequestId(self.issued + 1)
    }

    pub fn is_pending(
        &self,
        operation: Operation,
    ) -> bool {
        *self.in_flight.get(operation) > 0
    }

    pub fn price(&self) -> Option<PriceEstimate> {
        self.estimate.as_ref().map(|quoted| quoted.estimate)
    }

    pub fn is_estimate_stale(&self) -> bool {
        self.estimate
            .as_ref()
            .is_some_and(|quoted| quoted.is_stale(&self.form))
    }
}
