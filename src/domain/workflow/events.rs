//! User actions dispatched to the phase controller.

use std::collections::HashMap;

/// Every user action the workflow reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// Company name form submitted (raw, untrimmed).
    CompanySubmitted(String),

    /// One of the offered suggestions picked after an ambiguous validation.
    SuggestionChosen(String),

    /// "Proceed" after a valid validation result.
    ProceedRequested,

    /// A hypothesis checkbox changed.
    HypothesisToggled(String),

    /// "Validate hypotheses" pressed.
    HypothesesValidated,

    /// An ROI form submitted for the project at `project_index`.
    RoiSubmitted {
        project_index: usize,
        project_title: String,
        values: HashMap<String, String>,
    },

    BackRequested,

    NewAnalysisRequested,
}

impl WorkflowEvent {
    /// Name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowEvent::CompanySubmitted(_) => "company_submitted",
            WorkflowEvent::SuggestionChosen(_) => "suggestion_chosen",
            WorkflowEvent::ProceedRequested => "proceed_requested",
            WorkflowEvent::HypothesisToggled(_) => "hypothesis_toggled",
            WorkflowEvent::HypothesesValidated => "hypotheses_validated",
            WorkflowEvent::RoiSubmitted { .. } => "roi_submitted",
            WorkflowEvent::BackRequested => "back_requested",
            WorkflowEvent::NewAnalysisRequested => "new_analysis_requested",
        }
    }
}
