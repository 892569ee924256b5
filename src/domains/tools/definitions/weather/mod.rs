//! National Weather Service tool definitions.
//!
//! Active-alert lookup by state and 5-period forecasts by coordinate,
//! backed by the public NWS HTTP API.

pub mod alerts;
pub mod client;
pub mod forecast;

pub use alerts::AlertsTool;
pub use client::NwsClient;
pub use forecast::ForecastTool;
