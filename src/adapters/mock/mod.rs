//! Mock adapters for testing.

mod gateway;

pub use gateway::{MockDiscoveryGateway, MockError, MockReply, RecordedCall};
