//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, state machine trait)
//! - `company` - Company name, validation outcome, profile and research
//! - `selection` - Hypothesis checkbox state and the advance gate
//! - `recommendation` - Recommended projects in aligned and filler pools
//! - `roi` - Schema-driven ROI forms, results and rendering
//! - `workflow` - The four-phase discovery state machine and its session

pub mod company;
pub mod foundation;
pub mod recommendation;
pub mod roi;
pub mod selection;
pub mod workflow;
