//! Company module.
//!
//! The carried-forward facts about the company under discovery: the
//! submitted name, its validation outcome, the inferred profile, and the
//! research bundle with its hypotheses.

mod profile;
mod research;
mod validation;

pub use profile::{CompanyDetails, CompanyName, CompanyProfile};
pub use research::{Hypothesis, ResearchBundle};
pub use validation::{ConfidenceLevel, StatusBanner, ValidationResult, ValidationStatus};
