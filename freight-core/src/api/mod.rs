pub mod client;
pub mod factory;

pub use client::{ApiError, BookingApi};
pub use factory::{ClientConfig, ClientFactory, ClientRegistry, DEFAULT_BASE_URL};
