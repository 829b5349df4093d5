//! View state of the booking dashboard and the controller that drives it.
//!
//! State only changes through [`transition`]; the [`Dashboard`] controller
//! wraps it with the network calls.

mod controller;
mod error;
mod form;
mod state;
mod transition;

pub use controller::{Dashboard, PendingRequest};
pub use error::DashboardError;
pub use form::{BookingForm, FieldName, parse_weight, validate_tracking_query};
pub use state::{
    DashboardState, ErrorNotice, Notice, Operation, PerOperation, QuotedEstimate, RequestId, Tab,
};
pub use transition::{Action, ResponsePolicy, transition};
