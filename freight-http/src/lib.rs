mod client;
mod factory;

pub use client::HttpBookingApi;
pub use factory::HttpClientFactory;
