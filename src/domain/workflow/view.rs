//! Render-ready snapshot of a discovery session.
//!
//! A [`PhaseView`] is a pure function of the session: the visible phase, its
//! content, the loading text of an outstanding call, and any error that
//! replaced the content.

use crate::domain::company::{CompanyProfile, Hypothesis, ValidationResult};
use crate::domain::recommendation::{Project, ProjectPool};
use crate::domain::roi::{FormLayout, RenderedRoi, RoiFormEngine, RoiResultRenderer};
use crate::ports::Endpoint;

use super::{DiscoverySession, Phase, WorkflowError};

/// How the user recovers from an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAffordance {
    /// Restart the whole workflow.
    Reload,
    /// Fix the form and submit again.
    Resubmit,
}

/// A user-visible error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseError {
    pub message: String,
    pub retry: RetryAffordance,
}

impl PhaseError {
    pub fn from_error(err: &WorkflowError) -> Self {
        let roi_scoped = matches!(
            err,
            WorkflowError::RoiInputInvalid(_) | WorkflowError::RoiSchemaMissing(_)
        ) || matches!(
            err.endpoint(),
            Some(Endpoint::ProjectRoi | Endpoint::CatalogRoi)
        );

        Self {
            message: err.user_message(),
            retry: if roi_scoped {
                RetryAffordance::Resubmit
            } else {
                RetryAffordance::Reload
            },
        }
    }
}

/// One hypothesis with its checkbox state.
#[derive(Debug, Clone, PartialEq)]
pub struct HypothesisRow {
    pub hypothesis: Hypothesis,
    pub checked: bool,
}

/// The ROI panel under a project card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoiPanel {
    pub pending: bool,
    pub rendered: Option<RenderedRoi>,
    pub error: Option<PhaseError>,
}

/// A project card with its calculator form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    /// Position in the pooled list; ROI submissions address the card by it.
    pub index: usize,
    pub pool: ProjectPool,
    pub project: Project,
    pub form: FormLayout,
    pub roi: RoiPanel,
}

/// Header above the recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsHeader {
    pub company_name: String,
    pub industry: String,
    pub description: Option<String>,
    pub selected_hypotheses: Vec<String>,
}

/// Content of the visible phase.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseContent {
    CompanyInput {
        /// Name kept from an earlier submission, after stepping back.
        prefill: Option<String>,
    },
    Validating {
        submitted: String,
        validation: Option<ValidationResult>,
        can_proceed: bool,
    },
    Researching {
        profile: Option<CompanyProfile>,
        findings: Vec<String>,
        hypotheses: Vec<HypothesisRow>,
        can_validate: bool,
    },
    Results {
        header: Option<ResultsHeader>,
        aligned: Vec<ProjectCard>,
        filler: Vec<ProjectCard>,
        filler_toggle_label: Option<String>,
    },
}

/// Everything needed to draw the session.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseView {
    pub phase: Phase,
    pub loading: Option<&'static str>,
    pub error: Option<PhaseError>,
    pub content: PhaseContent,
}

impl PhaseView {
    pub fn of(session: &DiscoverySession) -> Self {
        let content = match session.phase() {
            Phase::CompanyInput => PhaseContent::CompanyInput {
                prefill: session.company_name().map(|n| n.to_string()),
            },
            Phase::Validating => PhaseContent::Validating {
                submitted: session
                    .company_name()
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
                validation: session.validation().cloned(),
                can_proceed: session.can_proceed(),
            },
            Phase::Researching => Self::researching(session),
            Phase::Results => Self::results(session),
        };

        Self {
            phase: session.phase(),
            loading: session.loading_message(),
            error: session.phase_error().cloned(),
            content,
        }
    }

    /// Whether the control that triggers the next call should be enabled.
    pub fn controls_enabled(&self) -> bool {
        self.loading.is_none()
    }

    fn researching(session: &DiscoverySession) -> PhaseContent {
        let (findings, hypotheses) = match session.research() {
            Some(bundle) => (
                bundle.findings().to_vec(),
                bundle
                    .hypotheses()
                    .iter()
                    .map(|h| HypothesisRow {
                        hypothesis: h.clone(),
                        checked: session.selection().is_some_and(|s| s.is_checked(&h.text)),
                    })
                    .collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        PhaseContent::Researching {
            profile: session.profile().cloned(),
            findings,
            hypotheses,
            can_validate: session.can_validate_hypotheses(),
        }
    }

    fn results(session: &DiscoverySession) -> PhaseContent {
        let header = session.profile().map(|profile| ResultsHeader {
            company_name: profile.name().to_string(),
            industry: profile.industry().to_string(),
            description: profile.description().map(str::to_string),
            selected_hypotheses: session
                .selection()
                .map(|s| s.selection().texts().to_vec())
                .unwrap_or_default(),
        });

        let mut aligned = Vec::new();
        let mut filler = Vec::new();
        let mut filler_toggle_label = None;

        if let Some(recommendations) = session.recommendations() {
            for (index, project) in recommendations.pooled().enumerate() {
                let pool = recommendations.pool_of(index).unwrap_or(ProjectPool::Filler);
                let card = ProjectCard {
                    index,
                    pool,
                    project: project.clone(),
                    form: RoiFormEngine::layout(project),
                    roi: Self::roi_panel(session, index),
                };
                match pool {
                    ProjectPool::Aligned => aligned.push(card),
                    ProjectPool::Filler => filler.push(card),
                }
            }
            filler_toggle_label = recommendations.filler_toggle_label();
        }

        PhaseContent::Results {
            header,
            aligned,
            filler,
            filler_toggle_label,
        }
    }

    fn roi_panel(session: &DiscoverySession, index: usize) -> RoiPanel {
        match session.roi_slot(index) {
            Some(slot) => RoiPanel {
                pending: slot.pending,
                rendered: slot.result.as_ref().map(RoiResultRenderer::render),
                error: slot.error.clone(),
            },
            None => RoiPanel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::GatewayError;

    #[test]
    fn phase_errors_offer_reload() {
        let err: WorkflowError = GatewayError::from_status(Endpoint::ValidateCompany, 500).into();
        let view = PhaseError::from_error(&err);
        assert_eq!(view.retry, RetryAffordance::Reload);
        assert_eq!(view.message, "Failed to validate company name. Please try again.");
    }

    #[test]
    fn roi_errors_offer_resubmit() {
        let err: WorkflowError = GatewayError::from_status(Endpoint::ProjectRoi, 429).into();
        let view = PhaseError::from_error(&err);
        assert_eq!(view.retry, RetryAffordance::Resubmit);
        assert_eq!(
            view.message,
            "Error calculating ROI. Please check your inputs and try again."
        );
    }

    #[test]
    fn new_session_shows_empty_company_input() {
        let view = PhaseView::of(&DiscoverySession::new());
        assert_eq!(view.phase, Phase::CompanyInput);
        assert_eq!(view.content, PhaseContent::CompanyInput { prefill: None });
        assert!(view.controls_enabled());
    }

    #[test]
    fn pending_validation_shows_loading_and_disables_controls() {
        let mut session = DiscoverySession::new();
        let _call = session.begin_validation("Acme").unwrap();
        let view = PhaseView::of(&session);

        assert_eq!(view.loading, Some("Validating company name..."));
        assert!(!view.controls_enabled());
        assert!(matches!(
            view.content,
            PhaseContent::Validating { ref submitted, can_proceed: false, .. } if submitted == "Acme"
        ));
    }
}
