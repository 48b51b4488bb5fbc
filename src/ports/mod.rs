//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DiscoveryGateway` - the analysis service (validation, research,
//!   recommendations, ROI)

mod discovery_gateway;

pub use discovery_gateway::{CallOutcome, DiscoveryGateway, Endpoint, GatewayError};
