//! Integration tests for the discovery workflow.
//!
//! These tests drive a PhaseController against the mock gateway and verify:
//! 1. Which calls are issued (and which are not) for each user action
//! 2. How results and failures surface in the rendered view
//! 3. That late results from abandoned phases are discarded

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use company_discovery::adapters::mock::{MockDiscoveryGateway, MockError, MockReply, RecordedCall};
use company_discovery::application::{PhaseController, RoiForm};
use company_discovery::domain::company::{
    CompanyDetails, Hypothesis, ResearchBundle, ValidationResult, ValidationStatus,
};
use company_discovery::domain::recommendation::{Project, Recommendations};
use company_discovery::domain::roi::{CatalogRoiResult, DefaultRoiResult, RoiResult, RoiSchema};
use company_discovery::domain::workflow::{
    Completion, DiscoverySession, Phase, PhaseContent, RetryAffordance, WorkflowError,
    WorkflowEvent,
};
use company_discovery::ports::{Endpoint, GatewayError};

// =============================================================================
// Test Infrastructure
// =============================================================================

const EXPANSION: &str = "Expand into new markets";
const MARGINS: &str = "Improve operating margins";

fn valid() -> ValidationResult {
    let mut result = ValidationResult::new(ValidationStatus::Valid, "Company verified");
    result.confidence = Some(92.0);
    result.sources = vec!["SEC EDGAR".to_string(), "Wikipedia".to_string()];
    result
}

fn ambiguous() -> ValidationResult {
    let mut result = ValidationResult::new(ValidationStatus::Ambiguous, "Multiple matches found");
    result.suggestions = vec!["Acme Corp".to_string(), "Acme Inc".to_string()];
    result
}

fn details() -> CompanyDetails {
    CompanyDetails {
        industry: "Manufacturing".to_string(),
        company_size: "Enterprise (1000+ employees)".to_string(),
        description: "Maker of anvils and rocket skates".to_string(),
        confidence: Some(85.0),
    }
}

fn research() -> ResearchBundle {
    ResearchBundle::new(
        vec!["Revenue grew 12% last year".to_string()],
        vec![
            Hypothesis::new(EXPANSION, "New plants announced", "Demand forecasting"),
            Hypothesis::new(MARGINS, "Rising input costs", "Predictive maintenance"),
        ],
    )
}

fn catalog_schema() -> RoiSchema {
    RoiSchema::from_value(&json!({
        "variables": {
            "implementation_cost": {
                "label": "Implementation Cost",
                "type": "currency",
                "default": 150
            },
            "downtime_hours_saved": {
                "label": "Downtime Hours Saved",
                "type": "number",
                "default": 40,
                "min": 0
            }
        }
    }))
    .unwrap()
}

fn recommendations() -> Recommendations {
    Recommendations::new(
        vec![
            Project::new("Predictive Maintenance")
                .with_priority("High")
                .with_schema(catalog_schema()),
            Project::new("Demand Forecasting").with_priority("Medium"),
        ],
        vec![Project::new("Support Chatbot")],
    )
}

fn catalog_values(cost: &str) -> HashMap<String, String> {
    HashMap::from([
        ("implementation_cost".to_string(), cost.to_string()),
        ("downtime_hours_saved".to_string(), "40".to_string()),
    ])
}

fn default_values(improvement: &str) -> HashMap<String, String> {
    HashMap::from([
        ("current_process_cost".to_string(), "25000".to_string()),
        ("current_accuracy".to_string(), "80".to_string()),
        ("current_processing_time".to_string(), "30".to_string()),
        ("expected_improvement".to_string(), improvement.to_string()),
        ("implementation_cost".to_string(), "200000".to_string()),
        ("annual_operating_cost".to_string(), "50000".to_string()),
    ])
}

fn catalog_result(breakeven_months: Option<f64>) -> RoiResult {
    RoiResult::Catalog(CatalogRoiResult {
        roi_percentage: 245.0,
        annual_benefit: 480_000.0,
        breakeven_months,
        three_year_npv: 1_150_000.0,
        variables_used: vec![
            ("implementation_cost".to_string(), 150_000.0),
            ("downtime_hours_saved".to_string(), 40.0),
        ],
    })
}

fn default_result() -> RoiResult {
    RoiResult::Default(DefaultRoiResult {
        project_title: "Demand Forecasting".to_string(),
        roi_percentage: 150.0,
        annual_savings: 120_000.0,
        payback_months: 9.5,
        three_year_npv: 310_000.0,
        current_annual_cost: 300_000.0,
        ai_annual_cost: 180_000.0,
        accuracy_improvement: "80% → 95%".to_string(),
        speed_improvement: "2.5x faster".to_string(),
    })
}

fn controller(gateway: &MockDiscoveryGateway) -> PhaseController {
    PhaseController::new(Arc::new(gateway.clone()))
}

/// Drives a fresh controller to Results with the first hypothesis selected.
/// The gateway must have the first four replies queued.
async fn reach_results(gateway: &MockDiscoveryGateway) -> PhaseController {
    let mut controller = controller(gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::HypothesisToggled(EXPANSION.to_string()))
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap();
    gateway.clear_calls();
    controller
}

fn results_gateway() -> MockDiscoveryGateway {
    MockDiscoveryGateway::new()
        .with_validation(valid())
        .with_details(details())
        .with_research(research())
        .with_recommendations(recommendations())
}

// =============================================================================
// Full Workflow
// =============================================================================

#[tokio::test]
async fn happy_path_walks_all_four_phases() {
    let gateway = results_gateway().with_roi(default_result());
    let mut controller = controller(&gateway);

    let view = controller
        .dispatch(WorkflowEvent::CompanySubmitted("  Acme  ".to_string()))
        .await
        .unwrap();
    assert_eq!(view.phase, Phase::Validating);
    match &view.content {
        PhaseContent::Validating {
            submitted,
            can_proceed,
            validation,
        } => {
            assert_eq!(submitted, "Acme");
            assert!(*can_proceed);
            assert_eq!(
                validation.as_ref().unwrap().sources_line().as_deref(),
                Some("Verified via: SEC EDGAR, Wikipedia")
            );
        }
        other => panic!("unexpected content: {:?}", other),
    }

    let view = controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();
    assert_eq!(view.phase, Phase::Researching);
    match &view.content {
        PhaseContent::Researching {
            profile,
            hypotheses,
            can_validate,
            ..
        } => {
            assert_eq!(profile.as_ref().unwrap().industry(), "Manufacturing");
            assert_eq!(hypotheses.len(), 2);
            assert!(hypotheses.iter().all(|row| !row.checked));
            assert!(!*can_validate);
        }
        other => panic!("unexpected content: {:?}", other),
    }

    controller
        .dispatch(WorkflowEvent::HypothesisToggled(MARGINS.to_string()))
        .await
        .unwrap();
    let view = controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap();
    assert_eq!(view.phase, Phase::Results);
    match &view.content {
        PhaseContent::Results {
            header,
            aligned,
            filler,
            filler_toggle_label,
        } => {
            let header = header.as_ref().unwrap();
            assert_eq!(header.company_name, "Acme");
            assert_eq!(header.selected_hypotheses, vec![MARGINS.to_string()]);
            assert_eq!(aligned.len(), 2);
            assert_eq!(filler.len(), 1);
            assert_eq!(filler[0].index, 2);
            assert_eq!(
                filler_toggle_label.as_deref(),
                Some("Show Additional Projects (1)")
            );
        }
        other => panic!("unexpected content: {:?}", other),
    }

    controller
        .calculate_roi(RoiForm::new(1, "Demand Forecasting", default_values("2.5")))
        .await
        .unwrap();

    assert_eq!(
        gateway.endpoints_called(),
        vec![
            Endpoint::ValidateCompany,
            Endpoint::InferCompanyDetails,
            Endpoint::PreEngagementAnalysis,
            Endpoint::AiRecommendations,
            Endpoint::ProjectRoi,
        ]
    );
    let slot = controller.session().roi_slot(1).unwrap();
    assert_eq!(slot.result, Some(default_result()));
    assert!(!slot.pending);
}

// =============================================================================
// Company Input and Validation
// =============================================================================

#[tokio::test]
async fn empty_name_issues_no_call() {
    let gateway = MockDiscoveryGateway::new();
    let mut controller = controller(&gateway);

    for raw in ["", "   ", "\t\n"] {
        let err = controller
            .dispatch(WorkflowEvent::CompanySubmitted(raw.to_string()))
            .await
            .unwrap_err();
        assert_eq!(err, WorkflowError::EmptyInput);
    }

    assert_eq!(gateway.call_count(), 0);
    assert_eq!(controller.view().phase, Phase::CompanyInput);
}

#[tokio::test]
async fn chosen_suggestion_is_used_for_research_without_revalidating() {
    let gateway = MockDiscoveryGateway::new()
        .with_validation(ambiguous())
        .with_details(details())
        .with_research(research());
    let mut controller = controller(&gateway);

    let view = controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();
    match &view.content {
        PhaseContent::Validating { can_proceed, .. } => assert!(!*can_proceed),
        other => panic!("unexpected content: {:?}", other),
    }

    controller
        .dispatch(WorkflowEvent::SuggestionChosen("Acme Inc".to_string()))
        .await
        .unwrap();
    assert_eq!(gateway.call_count(), 1);
    assert!(controller.session().can_proceed());

    controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();

    let calls = gateway.get_calls();
    assert_eq!(
        calls[1],
        RecordedCall::InferCompanyDetails {
            company_name: "Acme Inc".to_string()
        }
    );
    match &calls[2] {
        RecordedCall::PreEngagementAnalysis { profile } => {
            assert_eq!(profile.name(), "Acme Inc");
            assert_eq!(profile.size(), "Enterprise (1000+ employees)");
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn proceed_is_refused_for_invalid_company() {
    let gateway = MockDiscoveryGateway::new().with_validation(ValidationResult::new(
        ValidationStatus::Invalid,
        "No such company",
    ));
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Nonexistent".to_string()))
        .await
        .unwrap();

    let err = controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::NotReady(_)));
    assert_eq!(gateway.call_count(), 1);
    assert_eq!(controller.view().phase, Phase::Validating);
}

#[tokio::test]
async fn rate_limited_validation_shows_quota_message() {
    let gateway = MockDiscoveryGateway::new().with_error(MockError::RateLimited);
    let mut controller = controller(&gateway);

    let err = controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::RateLimited(Endpoint::ValidateCompany));
    let view = controller.view();
    assert_eq!(view.loading, None);
    let error = view.error.unwrap();
    assert_eq!(
        error.message,
        "API quota exceeded. The system is automatically retrying. This may take a few minutes..."
    );
    assert_eq!(error.retry, RetryAffordance::Reload);
}

#[tokio::test]
async fn rate_limited_recommendations_ask_to_wait_for_quota_reset() {
    let gateway = MockDiscoveryGateway::new()
        .with_validation(valid())
        .with_details(details())
        .with_research(research())
        .with_error(MockError::RateLimited);
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::HypothesisToggled(EXPANSION.to_string()))
        .await
        .unwrap();

    let err = controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), Endpoint::AiRecommendations.failure_message(true));
    assert!(controller.view().error.unwrap().message.contains("quota resets"));
}

// =============================================================================
// Research and Selection
// =============================================================================

#[tokio::test]
async fn recommendations_require_a_selected_hypothesis() {
    let gateway = MockDiscoveryGateway::new()
        .with_validation(valid())
        .with_details(details())
        .with_research(research());
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();

    let err = controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap_err();
    assert_eq!(err, WorkflowError::NoHypothesesSelected);

    // Checking then unchecking leaves nothing selected.
    for _ in 0..2 {
        controller
            .dispatch(WorkflowEvent::HypothesisToggled(EXPANSION.to_string()))
            .await
            .unwrap();
    }
    let err = controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap_err();
    assert_eq!(err, WorkflowError::NoHypothesesSelected);

    assert_eq!(gateway.call_count(), 3);
    assert_eq!(controller.view().phase, Phase::Researching);
}

#[tokio::test]
async fn selected_hypotheses_are_sent_in_display_order() {
    let gateway = results_gateway();
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();
    controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap();
    for text in [MARGINS, EXPANSION] {
        controller
            .dispatch(WorkflowEvent::HypothesisToggled(text.to_string()))
            .await
            .unwrap();
    }
    controller
        .dispatch(WorkflowEvent::HypothesesValidated)
        .await
        .unwrap();

    match gateway.get_calls().last() {
        Some(RecordedCall::AiRecommendations {
            selected_hypotheses,
            ..
        }) => {
            assert_eq!(
                selected_hypotheses,
                &vec![EXPANSION.to_string(), MARGINS.to_string()]
            );
        }
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn failed_research_clears_profile_and_stays_in_phase() {
    let gateway = MockDiscoveryGateway::new()
        .with_validation(valid())
        .with_details(details())
        .with_error(MockError::Transport);
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();

    let err = controller
        .dispatch(WorkflowEvent::ProceedRequested)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::Transport(Endpoint::PreEngagementAnalysis, _)
    ));
    assert!(controller.session().profile().is_none());
    let view = controller.view();
    assert_eq!(view.phase, Phase::Researching);
    assert_eq!(
        view.error.unwrap().message,
        "Failed to analyze company. Please check the company name and try again."
    );
}

// =============================================================================
// ROI
// =============================================================================

#[tokio::test]
async fn currency_values_are_sent_in_absolute_units() {
    let gateway = results_gateway();
    let mut controller = reach_results(&gateway).await;
    gateway.push_reply(MockReply::Roi(catalog_result(Some(6.5))));

    controller
        .calculate_roi(RoiForm::new(
            0,
            "Predictive Maintenance",
            catalog_values("250"),
        ))
        .await
        .unwrap();

    match gateway.get_calls().as_slice() {
        [RecordedCall::CatalogRoi(input)] => {
            assert_eq!(input.value("implementation_cost"), Some(250_000.0));
            assert_eq!(input.value("downtime_hours_saved"), Some(40.0));
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[tokio::test]
async fn unknown_project_title_issues_no_call() {
    let gateway = results_gateway();
    let mut controller = reach_results(&gateway).await;

    let err = controller
        .calculate_roi(RoiForm::new(0, "Not A Project", catalog_values("250")))
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::RoiSchemaMissing("Not A Project".to_string()));
    assert_eq!(
        err.user_message(),
        "ROI calculator configuration not found for this project."
    );
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn invalid_roi_input_lands_in_the_project_panel() {
    let gateway = results_gateway();
    let mut controller = reach_results(&gateway).await;

    let err = controller
        .calculate_roi(RoiForm::new(1, "Demand Forecasting", default_values("7")))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::RoiInputInvalid("expected_improvement".to_string())
    );
    assert_eq!(gateway.call_count(), 0);

    let view = controller.view();
    assert!(view.error.is_none());
    match &view.content {
        PhaseContent::Results { aligned, .. } => {
            let panel = &aligned[1].roi;
            let error = panel.error.as_ref().unwrap();
            assert_eq!(
                error.message,
                "Error calculating ROI. Please check your inputs and try again."
            );
            assert_eq!(error.retry, RetryAffordance::Resubmit);
            assert!(panel.rendered.is_none());
        }
        other => panic!("unexpected content: {:?}", other),
    }
}

#[tokio::test]
async fn missing_breakeven_renders_as_not_applicable() {
    let gateway = results_gateway().with_roi(catalog_result(None));
    let mut controller = reach_results(&gateway).await;

    controller
        .calculate_roi(RoiForm::new(
            0,
            "Predictive Maintenance",
            catalog_values("150"),
        ))
        .await
        .unwrap();

    match &controller.view().content {
        PhaseContent::Results { aligned, .. } => {
            let rendered = aligned[0].roi.rendered.as_ref().unwrap();
            assert_eq!(rendered.heading, "Project-Specific ROI Analysis");
            assert_eq!(rendered.metric("Breakeven Period"), Some("N/A"));
            assert!(!rendered.summary.contains("breakeven"));
            assert_eq!(
                rendered.variables,
                vec![("Downtime Hours Saved".to_string(), "40".to_string())]
            );
        }
        other => panic!("unexpected content: {:?}", other),
    }
}

#[tokio::test]
async fn failed_roi_call_stays_in_its_slot() {
    let gateway = results_gateway().with_error(MockError::Failed { status: 500 });
    let mut controller = reach_results(&gateway).await;

    let err = controller
        .calculate_roi(RoiForm::new(1, "Demand Forecasting", default_values("2.0")))
        .await
        .unwrap_err();

    assert_eq!(err, WorkflowError::CallFailed(Endpoint::ProjectRoi, 500));
    let view = controller.view();
    assert_eq!(view.phase, Phase::Results);
    assert!(view.error.is_none());
    let slot = controller.session().roi_slot(1).unwrap();
    assert!(slot.result.is_none());
    assert!(slot.error.is_some());
}

#[tokio::test]
async fn concurrent_roi_calls_land_in_their_own_slots() {
    let gateway = results_gateway()
        .with_roi(catalog_result(Some(6.5)))
        .with_roi(default_result());
    let mut controller = reach_results(&gateway).await;

    let results = controller
        .calculate_roi_many(vec![
            RoiForm::new(0, "Predictive Maintenance", catalog_values("150")),
            RoiForm::new(1, "Demand Forecasting", default_values("3.0")),
            RoiForm::new(2, "Wrong Title", default_values("3.0")),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert_eq!(
        results[2],
        Err(WorkflowError::RoiSchemaMissing("Wrong Title".to_string()))
    );
    assert_eq!(
        gateway.endpoints_called(),
        vec![Endpoint::CatalogRoi, Endpoint::ProjectRoi]
    );

    let session = controller.session();
    assert_eq!(
        session.roi_slot(0).unwrap().result,
        Some(catalog_result(Some(6.5)))
    );
    assert_eq!(session.roi_slot(1).unwrap().result, Some(default_result()));
    assert!(session.roi_slot(2).is_none());
}

// =============================================================================
// Navigation and Stale Results
// =============================================================================

#[test]
fn validation_result_after_back_is_discarded() {
    let mut session = DiscoverySession::new();
    let call = session.begin_validation("Acme").unwrap();

    session.go_back().unwrap();
    let completion = session.complete_validation(call, Ok(valid())).unwrap();

    assert!(completion.is_stale());
    assert_eq!(session.phase(), Phase::CompanyInput);
    assert!(session.validation().is_none());
    assert!(session.in_flight().is_none());
}

#[test]
fn failure_after_new_analysis_is_discarded() {
    let mut session = DiscoverySession::new();
    let call = session.begin_validation("Acme").unwrap();

    session.new_analysis();
    let completion = session
        .complete_validation(
            call,
            Err(GatewayError::from_status(Endpoint::ValidateCompany, 500)),
        )
        .unwrap();

    assert!(matches!(completion, Completion::Stale));
    assert!(session.phase_error().is_none());
    assert!(session.company_name().is_none());
}

#[tokio::test]
async fn back_while_details_are_outstanding_drops_them_and_skips_research() {
    let gateway = MockDiscoveryGateway::new()
        .with_validation(valid())
        .with_details(details())
        .with_research(research())
        .with_delay(Duration::from_millis(20));
    let mut controller = controller(&gateway);
    controller
        .dispatch(WorkflowEvent::CompanySubmitted("Acme".to_string()))
        .await
        .unwrap();

    let details_call = controller
        .handle(WorkflowEvent::ProceedRequested)
        .unwrap()
        .unwrap();
    let outstanding = tokio::spawn(details_call);

    assert!(controller
        .handle(WorkflowEvent::BackRequested)
        .unwrap()
        .is_none());
    assert_eq!(controller.view().phase, Phase::Validating);

    let late = outstanding.await.unwrap();
    assert!(controller.complete(late).unwrap().is_none());

    assert_eq!(
        gateway.endpoints_called(),
        vec![Endpoint::ValidateCompany, Endpoint::InferCompanyDetails]
    );
    assert!(controller.session().profile().is_none());
    assert_eq!(controller.view().phase, Phase::Validating);
    assert_eq!(gateway.pending_replies(), 1);
}

#[tokio::test]
async fn roi_result_after_new_analysis_is_dropped() {
    let gateway = results_gateway()
        .with_roi(default_result())
        .with_delay(Duration::from_millis(20));
    let mut controller = reach_results(&gateway).await;

    let roi_call = controller
        .handle(WorkflowEvent::RoiSubmitted {
            project_index: 1,
            project_title: "Demand Forecasting".to_string(),
            values: default_values("2.5"),
        })
        .unwrap()
        .unwrap();
    let outstanding = tokio::spawn(roi_call);
    controller
        .handle(WorkflowEvent::NewAnalysisRequested)
        .unwrap();

    let late = outstanding.await.unwrap();
    assert!(controller.complete(late).unwrap().is_none());

    assert!(controller.session().roi_slots().is_empty());
    assert_eq!(controller.view().phase, Phase::CompanyInput);
}

#[tokio::test]
async fn second_roi_form_is_accepted_while_the_first_is_outstanding() {
    let gateway = results_gateway()
        .with_roi(catalog_result(Some(4.0)))
        .with_roi(default_result());
    let mut controller = reach_results(&gateway).await;

    let first = controller
        .handle(WorkflowEvent::RoiSubmitted {
            project_index: 0,
            project_title: "Predictive Maintenance".to_string(),
            values: catalog_values("150"),
        })
        .unwrap()
        .unwrap();
    let second = controller
        .handle(WorkflowEvent::RoiSubmitted {
            project_index: 1,
            project_title: "Demand Forecasting".to_string(),
            values: default_values("2.5"),
        })
        .unwrap()
        .unwrap();
    assert!(controller.session().roi_slot(0).unwrap().pending);
    assert!(controller.session().roi_slot(1).unwrap().pending);

    let done = first.await;
    controller.complete(done).unwrap();
    let done = second.await;
    controller.complete(done).unwrap();

    let session = controller.session();
    assert_eq!(session.roi_slot(0).unwrap().result, Some(catalog_result(Some(4.0))));
    assert_eq!(session.roi_slot(1).unwrap().result, Some(default_result()));
}

#[tokio::test]
async fn back_from_results_discards_recommendations_and_roi() {
    let gateway = results_gateway().with_roi(default_result());
    let mut controller = reach_results(&gateway).await;
    controller
        .calculate_roi(RoiForm::new(1, "Demand Forecasting", default_values("2.5")))
        .await
        .unwrap();

    let view = controller
        .dispatch(WorkflowEvent::BackRequested)
        .await
        .unwrap();

    assert_eq!(view.phase, Phase::Researching);
    let session = controller.session();
    assert!(session.recommendations().is_none());
    assert!(session.roi_slots().is_empty());
    assert!(session.research().is_some());
    assert_eq!(gateway.endpoints_called(), vec![Endpoint::ProjectRoi]);
}

#[tokio::test]
async fn new_analysis_returns_to_an_empty_input() {
    let gateway = results_gateway();
    let mut controller = reach_results(&gateway).await;

    let view = controller
        .dispatch(WorkflowEvent::NewAnalysisRequested)
        .await
        .unwrap();

    assert_eq!(view.phase, Phase::CompanyInput);
    assert_eq!(view.content, PhaseContent::CompanyInput { prefill: None });
    assert_eq!(gateway.call_count(), 0);
}
