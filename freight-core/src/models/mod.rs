mod booking_draft;
mod price_estimate;
mod tracking;
mod vehicle_type;

pub use booking_draft::BookingDraft;
pub use price_estimate::PriceEstimate;
pub use tracking::{BookingReceipt, TrackingRecord};
pub use vehicle_type::VehicleType;
