//! Workflow module - the four-phase discovery state machine.
//!
//! - `phase` - the phases and their legal transitions
//! - `session` - carried-forward state, pending-call tickets, generation counter
//! - `events` - user actions
//! - `view` - render-ready snapshots and user-visible errors

mod errors;
mod events;
mod phase;
mod session;
mod view;

pub use errors::WorkflowError;
pub use events::WorkflowEvent;
pub use phase::Phase;
pub use session::{
    Completion, DiscoverySession, PendingCall, RecommendationRequest, RoiRequest, RoiSlot,
};
pub use view::{
    HypothesisRow, PhaseContent, PhaseError, PhaseView, ProjectCard, ResultsHeader, RetryAffordance,
    RoiPanel,
};
