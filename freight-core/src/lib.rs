pub mod api;
pub mod dashboard;
pub mod models;

pub use api::{ApiError, BookingApi, ClientConfig, ClientFactory, ClientRegistry};
pub use dashboard::{
    Action, BookingForm, Dashboard, DashboardError, DashboardState, ErrorNotice, FieldName, Notice,
    Operation, PendingRequest, PerOperation, QuotedEstimate, RequestId, ResponsePolicy, Tab,
    transition,
};
pub use models::*;
