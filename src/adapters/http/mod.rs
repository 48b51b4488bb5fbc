//! HTTP adapter for the analysis service.
//!
//! - `HttpDiscoveryGateway` - reqwest implementation of `DiscoveryGateway`
//! - `wire` - request and response bodies, ROI result tagging

mod gateway;
pub mod wire;

pub use gateway::{GatewayConfig, HttpDiscoveryGateway};
