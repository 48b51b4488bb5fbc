//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - The analysis service over HTTP (reqwest)
//! - `mock` - Scripted gateway for tests and offline runs

pub mod http;
pub mod mock;

pub use http::{GatewayConfig, HttpDiscoveryGateway};
pub use mock::{MockDiscoveryGateway, MockError, MockReply, RecordedCall};
