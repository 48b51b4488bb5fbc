//! Discovery session aggregate.
//!
//! Owns the current phase and every piece of carried-forward data. Calls to
//! the analysis service are split in two: a `begin_*` method checks the
//! guards, moves the phase and hands out a [`PendingCall`]; the matching
//! `complete_*` method applies the outcome. State changes only when a call
//! resolves, and only if the call is still current.
//!
//! Leaving a phase (back, new analysis) bumps the session generation. A
//! pending call issued under an older generation completes as
//! [`Completion::Stale`] and changes nothing.

use std::collections::{BTreeMap, HashMap};

use crate::domain::company::{
    CompanyDetails, CompanyName, CompanyProfile, ResearchBundle, ValidationResult,
};
use crate::domain::foundation::{SessionId, StateMachine};
use crate::domain::recommendation::{Project, Recommendations};
use crate::domain::roi::{RoiFormEngine, RoiResult, RoiSubmission};
use crate::domain::selection::SelectionManager;
use crate::ports::{Endpoint, GatewayError};

use super::{Phase, PhaseError, WorkflowError};

/// An issued call, stamped with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct PendingCall<R> {
    generation: u64,
    request: R,
}

impl<R> PendingCall<R> {
    fn new(generation: u64, request: R) -> Self {
        Self {
            generation,
            request,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &R {
        &self.request
    }
}

/// What happened to a call's outcome.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Completion<T> {
    Applied(T),
    /// The session moved on while the call was outstanding.
    Stale,
}

impl<T> Completion<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, Completion::Stale)
    }
}

/// Request for the recommendations call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub profile: CompanyProfile,
    pub selected_hypotheses: Vec<String>,
}

/// Request for an ROI call.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiRequest {
    pub project_index: usize,
    pub submission: RoiSubmission,
}

/// Result panel for one project.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoiSlot {
    pub pending: bool,
    pub result: Option<RoiResult>,
    pub error: Option<PhaseError>,
}

/// State of one discovery run.
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    id: SessionId,
    phase: Phase,
    generation: u64,
    in_flight: Option<Endpoint>,
    phase_error: Option<PhaseError>,

    company_name: Option<CompanyName>,
    validation: Option<ValidationResult>,
    profile: Option<CompanyProfile>,
    research: Option<ResearchBundle>,
    selection: Option<SelectionManager>,
    recommendations: Option<Recommendations>,
    roi_slots: BTreeMap<usize, RoiSlot>,
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::CompanyInput,
            generation: 0,
            in_flight: None,
            phase_error: None,
            company_name: None,
            validation: None,
            profile: None,
            research: None,
            selection: None,
            recommendations: None,
            roi_slots: BTreeMap::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The phase-advancing call currently outstanding, if any.
    pub fn in_flight(&self) -> Option<Endpoint> {
        self.in_flight
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.in_flight.map(|endpoint| endpoint.loading_message())
    }

    pub fn phase_error(&self) -> Option<&PhaseError> {
        self.phase_error.as_ref()
    }

    pub fn company_name(&self) -> Option<&CompanyName> {
        self.company_name.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationResult> {
        self.validation.as_ref()
    }

    pub fn profile(&self) -> Option<&CompanyProfile> {
        self.profile.as_ref()
    }

    pub fn research(&self) -> Option<&ResearchBundle> {
        self.research.as_ref()
    }

    pub fn selection(&self) -> Option<&SelectionManager> {
        self.selection.as_ref()
    }

    pub fn recommendations(&self) -> Option<&Recommendations> {
        self.recommendations.as_ref()
    }

    pub fn roi_slot(&self, project_index: usize) -> Option<&RoiSlot> {
        self.roi_slots.get(&project_index)
    }

    pub fn roi_slots(&self) -> &BTreeMap<usize, RoiSlot> {
        &self.roi_slots
    }

    /// The name research will run under, once validation allows proceeding.
    pub fn resolved_name(&self) -> Option<&str> {
        let submitted = self.company_name.as_ref()?;
        let validation = self.validation.as_ref()?;
        Some(validation.resolved_name(submitted.as_str()))
    }

    /// Whether "proceed" is currently available.
    pub fn can_proceed(&self) -> bool {
        self.phase == Phase::Validating
            && self.in_flight.is_none()
            && self.validation.as_ref().is_some_and(|v| v.is_valid())
    }

    /// Whether "validate hypotheses" is currently available.
    pub fn can_validate_hypotheses(&self) -> bool {
        self.phase == Phase::Researching
            && self.in_flight.is_none()
            && self.selection.as_ref().is_some_and(|s| s.can_advance())
    }

    // ───────────────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────────────

    /// Submits a company name. Empty names are rejected without leaving
    /// `CompanyInput`.
    pub fn begin_validation(&mut self, raw: &str) -> Result<PendingCall<CompanyName>, WorkflowError> {
        let name = CompanyName::parse(raw).map_err(|_| WorkflowError::EmptyInput)?;
        self.ensure_idle()?;
        self.advance_to(Phase::Validating)?;

        self.company_name = Some(name.clone());
        self.validation = None;
        self.phase_error = None;
        self.in_flight = Some(Endpoint::ValidateCompany);
        Ok(PendingCall::new(self.generation, name))
    }

    pub fn complete_validation(
        &mut self,
        call: PendingCall<CompanyName>,
        outcome: Result<ValidationResult, GatewayError>,
    ) -> Result<Completion<()>, WorkflowError> {
        if !self.is_current(&call, Endpoint::ValidateCompany) {
            return Ok(Completion::Stale);
        }
        self.in_flight = None;

        let validation = outcome.map_err(|err| self.fail_phase(err))?;
        self.validation = Some(validation);
        Ok(Completion::Applied(()))
    }

    /// Resolves an ambiguous result locally to the picked suggestion.
    pub fn choose_suggestion(&mut self, suggestion: &str) -> Result<(), WorkflowError> {
        self.ensure_phase(Phase::Validating)?;
        self.ensure_idle()?;
        let current = self
            .validation
            .as_ref()
            .ok_or_else(|| WorkflowError::not_ready("no validation result"))?;
        let chosen = current
            .choose_suggestion(suggestion)
            .map_err(|err| WorkflowError::not_ready(err.to_string()))?;
        self.validation = Some(chosen);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────
    // Research
    // ───────────────────────────────────────────────────────────────────────

    /// Proceeds from a valid result into research. The returned call is the
    /// detail inference; research follows from [`Self::complete_details`].
    pub fn begin_research(&mut self) -> Result<PendingCall<String>, WorkflowError> {
        self.ensure_phase(Phase::Validating)?;
        self.ensure_idle()?;
        let name = match (&self.validation, self.resolved_name()) {
            (Some(validation), Some(name)) if validation.is_valid() => name.to_string(),
            _ => return Err(WorkflowError::not_ready("company name has not been validated")),
        };

        self.advance_to(Phase::Researching)?;
        self.phase_error = None;
        self.in_flight = Some(Endpoint::InferCompanyDetails);
        Ok(PendingCall::new(self.generation, name))
    }

    /// Applies inferred details and issues the research call, which carries
    /// the resulting profile.
    pub fn complete_details(
        &mut self,
        call: PendingCall<String>,
        outcome: Result<CompanyDetails, GatewayError>,
    ) -> Result<Completion<PendingCall<CompanyProfile>>, WorkflowError> {
        if !self.is_current(&call, Endpoint::InferCompanyDetails) {
            return Ok(Completion::Stale);
        }
        self.in_flight = None;

        let details = outcome.map_err(|err| self.fail_phase(err))?;
        let profile = CompanyProfile::from_details(call.request, details);
        self.profile = Some(profile.clone());
        self.in_flight = Some(Endpoint::PreEngagementAnalysis);
        Ok(Completion::Applied(PendingCall::new(self.generation, profile)))
    }

    pub fn complete_research(
        &mut self,
        call: PendingCall<CompanyProfile>,
        outcome: Result<ResearchBundle, GatewayError>,
    ) -> Result<Completion<()>, WorkflowError> {
        if !self.is_current(&call, Endpoint::PreEngagementAnalysis) {
            return Ok(Completion::Stale);
        }
        self.in_flight = None;

        match outcome {
            Ok(bundle) => {
                self.selection = Some(SelectionManager::new(bundle.hypotheses()));
                self.research = Some(bundle);
                Ok(Completion::Applied(()))
            }
            Err(err) => {
                self.profile = None;
                Err(self.fail_phase(err))
            }
        }
    }

    /// Flips a hypothesis checkbox; returns its new state.
    pub fn toggle_hypothesis(&mut self, text: &str) -> Result<bool, WorkflowError> {
        self.ensure_phase(Phase::Researching)?;
        let selection = self
            .selection
            .as_mut()
            .ok_or_else(|| WorkflowError::not_ready("research has not completed"))?;
        selection
            .toggle(text)
            .map_err(|err| WorkflowError::not_ready(err.to_string()))
    }

    // ───────────────────────────────────────────────────────────────────────
    // Recommendations
    // ───────────────────────────────────────────────────────────────────────

    pub fn begin_recommendations(
        &mut self,
    ) -> Result<PendingCall<RecommendationRequest>, WorkflowError> {
        self.ensure_phase(Phase::Researching)?;
        self.ensure_idle()?;
        let (profile, selection) = match (&self.profile, &self.selection) {
            (Some(profile), Some(selection)) => (profile, selection),
            _ => return Err(WorkflowError::not_ready("research has not completed")),
        };
        if !selection.can_advance() {
            return Err(WorkflowError::NoHypothesesSelected);
        }

        let request = RecommendationRequest {
            profile: profile.clone(),
            selected_hypotheses: selection.selection().texts().to_vec(),
        };
        self.advance_to(Phase::Results)?;
        self.phase_error = None;
        self.in_flight = Some(Endpoint::AiRecommendations);
        Ok(PendingCall::new(self.generation, request))
    }

    pub fn complete_recommendations(
        &mut self,
        call: PendingCall<RecommendationRequest>,
        outcome: Result<Recommendations, GatewayError>,
    ) -> Result<Completion<()>, WorkflowError> {
        if !self.is_current(&call, Endpoint::AiRecommendations) {
            return Ok(Completion::Stale);
        }
        self.in_flight = None;

        let recommendations = outcome.map_err(|err| self.fail_phase(err))?;
        self.recommendations = Some(recommendations);
        self.roi_slots.clear();
        Ok(Completion::Applied(()))
    }

    // ───────────────────────────────────────────────────────────────────────
    // ROI
    // ───────────────────────────────────────────────────────────────────────

    /// Resolves the project and validates the form values.
    ///
    /// The pooled project at `project_index` must carry `project_title`.
    /// Nothing is issued when that fails or when a value is invalid.
    pub fn prepare_roi(
        &mut self,
        project_index: usize,
        project_title: &str,
        values: &HashMap<String, String>,
    ) -> Result<PendingCall<RoiRequest>, WorkflowError> {
        let project = self.resolve_project(project_index, project_title)?.clone();
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| WorkflowError::RoiSchemaMissing(project_title.to_string()))?;

        if self
            .roi_slots
            .get(&project_index)
            .is_some_and(|slot| slot.pending)
        {
            return Err(WorkflowError::CallInFlight(Phase::Results));
        }

        let submission = match RoiFormEngine::validate(&project, profile, values) {
            Ok(submission) => submission,
            Err(err) => {
                let err = WorkflowError::from(err);
                let slot = self.roi_slots.entry(project_index).or_default();
                slot.result = None;
                slot.error = Some(PhaseError::from_error(&err));
                return Err(err);
            }
        };

        let slot = self.roi_slots.entry(project_index).or_default();
        slot.pending = true;
        slot.result = None;
        slot.error = None;

        Ok(PendingCall::new(
            self.generation,
            RoiRequest {
                project_index,
                submission,
            },
        ))
    }

    /// Lands an ROI outcome in its own slot. Failures stay in the slot.
    pub fn complete_roi(
        &mut self,
        call: PendingCall<RoiRequest>,
        outcome: Result<RoiResult, GatewayError>,
    ) -> Result<Completion<()>, WorkflowError> {
        if call.generation != self.generation {
            return Ok(Completion::Stale);
        }
        let Some(slot) = self.roi_slots.get_mut(&call.request.project_index) else {
            return Ok(Completion::Stale);
        };
        slot.pending = false;

        match outcome {
            Ok(result) => {
                slot.result = Some(result);
                slot.error = None;
                Ok(Completion::Applied(()))
            }
            Err(err) => {
                let err = WorkflowError::from(err);
                slot.result = None;
                slot.error = Some(PhaseError::from_error(&err));
                Err(err)
            }
        }
    }

    fn resolve_project(&self, index: usize, title: &str) -> Result<&Project, WorkflowError> {
        self.recommendations
            .as_ref()
            .and_then(|recommendations| recommendations.resolve(index, title))
            .ok_or_else(|| WorkflowError::RoiSchemaMissing(title.to_string()))
    }

    // ───────────────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────────────

    /// Steps back to the prior phase, discarding everything later phases
    /// produced. Outstanding calls become stale.
    pub fn go_back(&mut self) -> Result<Phase, WorkflowError> {
        let target = self
            .phase
            .prior()
            .ok_or_else(|| WorkflowError::not_ready("already at the first phase"))?;
        self.phase
            .transition_to(target)
            .map_err(|_| WorkflowError::InvalidTransition {
                from: self.phase,
                to: target,
            })?;
        self.reset_to(target);
        Ok(target)
    }

    /// Restarts at `CompanyInput` with nothing carried over.
    pub fn new_analysis(&mut self) {
        self.reset_to(Phase::CompanyInput);
        self.company_name = None;
    }

    fn reset_to(&mut self, target: Phase) {
        self.generation += 1;
        self.phase = target;
        self.in_flight = None;
        self.phase_error = None;

        if target < Phase::Results {
            self.recommendations = None;
            self.roi_slots.clear();
        }
        if target < Phase::Researching {
            self.profile = None;
            self.research = None;
            self.selection = None;
        }
        if target < Phase::Validating {
            self.validation = None;
        }
    }

    // ───────────────────────────────────────────────────────────────────────
    // Guards
    // ───────────────────────────────────────────────────────────────────────

    fn advance_to(&mut self, target: Phase) -> Result<(), WorkflowError> {
        self.phase = self
            .phase
            .transition_to(target)
            .map_err(|_| WorkflowError::InvalidTransition {
                from: self.phase,
                to: target,
            })?;
        Ok(())
    }

    fn ensure_phase(&self, expected: Phase) -> Result<(), WorkflowError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(WorkflowError::not_ready(format!(
                "action is only available in {}, current phase is {}",
                expected, self.phase
            )))
        }
    }

    fn ensure_idle(&self) -> Result<(), WorkflowError> {
        match self.in_flight {
            Some(_) => Err(WorkflowError::CallInFlight(self.phase)),
            None => Ok(()),
        }
    }

    fn is_current<R>(&self, call: &PendingCall<R>, endpoint: Endpoint) -> bool {
        call.generation == self.generation && self.in_flight == Some(endpoint)
    }

    fn fail_phase(&mut self, err: GatewayError) -> WorkflowError {
        let err = WorkflowError::from(err);
        self.phase_error = Some(PhaseError::from_error(&err));
        err
    }
}
