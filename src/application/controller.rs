//! PhaseController - Drives a discovery session through the gateway.
//!
//! Work is split in two so a caller can keep taking input while a call is
//! outstanding:
//!
//! - [`PhaseController::handle`] applies a [`WorkflowEvent`] and, when the
//!   event needs the analysis service, returns the [`InFlight`] call.
//! - [`PhaseController::complete`] applies a finished call. Research is a
//!   chain, so completing the detail inference returns the research call.
//!
//! A call that finishes after the session moved on (back, new analysis) is
//! dropped. [`PhaseController::dispatch`] runs both halves back to back.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::domain::company::{
    CompanyDetails, CompanyName, CompanyProfile, ResearchBundle, ValidationResult,
};
use crate::domain::recommendation::Recommendations;
use crate::domain::roi::{RoiResult, RoiSubmission};
use crate::domain::workflow::{
    Completion, DiscoverySession, PendingCall, PhaseView, RecommendationRequest, RoiRequest,
    WorkflowError, WorkflowEvent,
};
use crate::ports::{DiscoveryGateway, GatewayError};

/// An ROI form as submitted for one project card.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiForm {
    pub project_index: usize,
    pub project_title: String,
    pub values: HashMap<String, String>,
}

impl RoiForm {
    pub fn new(
        project_index: usize,
        project_title: impl Into<String>,
        values: HashMap<String, String>,
    ) -> Self {
        Self {
            project_index,
            project_title: project_title.into(),
            values,
        }
    }
}

/// A gateway call that has resolved, paired with the ticket it was issued
/// under.
#[derive(Debug)]
pub enum CompletedCall {
    Validation(PendingCall<CompanyName>, Result<ValidationResult, GatewayError>),
    Details(PendingCall<String>, Result<CompanyDetails, GatewayError>),
    Research(PendingCall<CompanyProfile>, Result<ResearchBundle, GatewayError>),
    Recommendations(
        PendingCall<RecommendationRequest>,
        Result<Recommendations, GatewayError>,
    ),
    Roi(PendingCall<RoiRequest>, Result<RoiResult, GatewayError>),
}

/// An issued call. Owns everything it needs, so it can be spawned.
pub type InFlight = BoxFuture<'static, CompletedCall>;

/// Owns one discovery session and sequences its calls.
pub struct PhaseController {
    gateway: Arc<dyn DiscoveryGateway>,
    session: DiscoverySession,
}

impl PhaseController {
    pub fn new(gateway: Arc<dyn DiscoveryGateway>) -> Self {
        Self {
            gateway,
            session: DiscoverySession::new(),
        }
    }

    pub fn session(&self) -> &DiscoverySession {
        &self.session
    }

    pub fn view(&self) -> PhaseView {
        PhaseView::of(&self.session)
    }

    /// Applies one user action and awaits every call it leads to.
    ///
    /// On error the session still reflects it (a phase error or an ROI panel
    /// error), so [`Self::view`] remains the thing to render.
    pub async fn dispatch(&mut self, event: WorkflowEvent) -> Result<PhaseView, WorkflowError> {
        let mut next = self.handle(event)?;
        while let Some(call) = next {
            next = self.complete(call.await)?;
        }
        Ok(self.view())
    }

    /// Applies one user action without waiting on the gateway.
    ///
    /// Returns the call to run when the action needs the analysis service.
    pub fn handle(&mut self, event: WorkflowEvent) -> Result<Option<InFlight>, WorkflowError> {
        tracing::debug!(
            "Session {}: handling {} in {}",
            self.session.id(),
            event.name(),
            self.session.phase()
        );

        let result = match event {
            WorkflowEvent::CompanySubmitted(raw) => self
                .session
                .begin_validation(&raw)
                .map(|call| Some(self.issue_validation(call))),
            WorkflowEvent::SuggestionChosen(suggestion) => {
                self.session.choose_suggestion(&suggestion).map(|_| None)
            }
            WorkflowEvent::ProceedRequested => self
                .session
                .begin_research()
                .map(|call| Some(self.issue_details(call))),
            WorkflowEvent::HypothesisToggled(text) => {
                self.session.toggle_hypothesis(&text).map(|_| None)
            }
            WorkflowEvent::HypothesesValidated => self
                .session
                .begin_recommendations()
                .map(|call| Some(self.issue_recommendations(call))),
            WorkflowEvent::RoiSubmitted {
                project_index,
                project_title,
                values,
            } => self
                .session
                .prepare_roi(project_index, &project_title, &values)
                .map(|call| Some(self.issue_roi(call))),
            WorkflowEvent::BackRequested => self.session.go_back().map(|_| None),
            WorkflowEvent::NewAnalysisRequested => {
                self.session.new_analysis();
                Ok(None)
            }
        };

        result.map_err(Self::reject)
    }

    /// Applies a finished call.
    ///
    /// Returns the follow-up call when there is one. Failures are recorded in
    /// the session before they are returned.
    pub fn complete(&mut self, done: CompletedCall) -> Result<Option<InFlight>, WorkflowError> {
        self.apply(done).map_err(|err| {
            tracing::debug!("Call settled with error [{}]: {}", err.code(), err);
            err
        })
    }

    fn apply(&mut self, done: CompletedCall) -> Result<Option<InFlight>, WorkflowError> {
        match done {
            CompletedCall::Validation(call, outcome) => {
                if let Ok(result) = &outcome {
                    tracing::info!("Company '{}' validated as {}", call.request(), result.status);
                }
                Self::settle(self.session.complete_validation(call, outcome)?, "validation");
                Ok(None)
            }
            CompletedCall::Details(call, outcome) => {
                match self.session.complete_details(call, outcome)? {
                    Completion::Applied(research) => Ok(Some(self.issue_research(research))),
                    Completion::Stale => {
                        tracing::debug!("Dropping stale company details");
                        Ok(None)
                    }
                }
            }
            CompletedCall::Research(call, outcome) => {
                if let Ok(bundle) = &outcome {
                    tracing::info!(
                        "Research produced {} findings and {} hypotheses",
                        bundle.findings().len(),
                        bundle.hypotheses().len()
                    );
                }
                Self::settle(self.session.complete_research(call, outcome)?, "research");
                Ok(None)
            }
            CompletedCall::Recommendations(call, outcome) => {
                if let Ok(recommendations) = &outcome {
                    tracing::info!(
                        "Received {} aligned and {} filler projects",
                        recommendations.aligned().len(),
                        recommendations.filler().len()
                    );
                    for title in recommendations.duplicate_titles() {
                        tracing::warn!("Duplicate project title in recommendations: '{}'", title);
                    }
                }
                Self::settle(
                    self.session.complete_recommendations(call, outcome)?,
                    "recommendations",
                );
                Ok(None)
            }
            CompletedCall::Roi(call, outcome) => {
                self.finish_roi(call, outcome)?;
                Ok(None)
            }
        }
    }

    /// Validates one ROI form and runs its calculator.
    ///
    /// Local failures (unknown project, bad value) issue no call.
    pub async fn calculate_roi(&mut self, form: RoiForm) -> Result<(), WorkflowError> {
        self.dispatch(WorkflowEvent::RoiSubmitted {
            project_index: form.project_index,
            project_title: form.project_title,
            values: form.values,
        })
        .await
        .map(|_| ())
    }

    /// Runs several ROI forms concurrently.
    ///
    /// Each form is validated first; the valid ones are issued together and
    /// each outcome lands in its own project slot. Results are returned in
    /// input order.
    pub async fn calculate_roi_many(
        &mut self,
        forms: Vec<RoiForm>,
    ) -> Vec<Result<(), WorkflowError>> {
        let mut results: Vec<Option<Result<(), WorkflowError>>> = Vec::with_capacity(forms.len());
        let mut issued = Vec::new();

        for (position, form) in forms.iter().enumerate() {
            match self
                .session
                .prepare_roi(form.project_index, &form.project_title, &form.values)
            {
                Ok(call) => {
                    issued.push((position, self.issue_roi(call)));
                    results.push(None);
                }
                Err(err) => results.push(Some(Err(err))),
            }
        }

        let (positions, calls): (Vec<_>, Vec<_>) = issued.into_iter().unzip();
        let finished = join_all(calls).await;

        for (position, done) in positions.into_iter().zip(finished) {
            results[position] = Some(self.complete(done).map(|_| ()));
        }

        results.into_iter().flatten().collect()
    }

    fn issue_validation(&self, call: PendingCall<CompanyName>) -> InFlight {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let outcome = gateway.validate_company(call.request().as_str()).await;
            CompletedCall::Validation(call, outcome)
        }
        .boxed()
    }

    fn issue_details(&self, call: PendingCall<String>) -> InFlight {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let outcome = gateway.infer_company_details(call.request()).await;
            CompletedCall::Details(call, outcome)
        }
        .boxed()
    }

    fn issue_research(&self, call: PendingCall<CompanyProfile>) -> InFlight {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let outcome = gateway.pre_engagement_analysis(call.request()).await;
            CompletedCall::Research(call, outcome)
        }
        .boxed()
    }

    fn issue_recommendations(&self, call: PendingCall<RecommendationRequest>) -> InFlight {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let request = call.request();
            let outcome = gateway
                .recommend_projects(&request.profile, &request.selected_hypotheses)
                .await;
            CompletedCall::Recommendations(call, outcome)
        }
        .boxed()
    }

    fn issue_roi(&self, call: PendingCall<RoiRequest>) -> InFlight {
        let gateway = Arc::clone(&self.gateway);
        async move {
            let outcome = match &call.request().submission {
                RoiSubmission::Default(input) => gateway.project_roi(input).await,
                RoiSubmission::Catalog(input) => gateway.catalog_roi(input).await,
            };
            CompletedCall::Roi(call, outcome)
        }
        .boxed()
    }

    fn finish_roi(
        &mut self,
        call: PendingCall<RoiRequest>,
        outcome: Result<RoiResult, GatewayError>,
    ) -> Result<(), WorkflowError> {
        let project_index = call.request().project_index;
        match self.session.complete_roi(call, outcome)? {
            Completion::Applied(()) => {
                tracing::debug!("ROI result stored for project {}", project_index);
            }
            Completion::Stale => {
                tracing::debug!("Dropping stale ROI result for project {}", project_index);
            }
        }
        Ok(())
    }

    fn reject(err: WorkflowError) -> WorkflowError {
        if !err.is_boundary() {
            tracing::debug!("Rejected locally [{}]: {}", err.code(), err);
        }
        err
    }

    fn settle(completion: Completion<()>, what: &str) {
        if completion.is_stale() {
            tracing::debug!("Dropping stale {} result", what);
        }
    }
}
