//! Application layer - orchestration between the domain and the ports.
//!
//! The phase controller turns user events into session transitions and
//! gateway calls.

mod controller;

pub use controller::{CompletedCall, InFlight, PhaseController, RoiForm};
