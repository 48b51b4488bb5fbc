//! Mock Discovery Gateway for testing.
//!
//! Provides a configurable mock implementation of the DiscoveryGateway port,
//! allowing tests to drive the workflow without a running service.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order across all endpoints
//! - Simulated delays for concurrency testing
//! - Error injection (429, other statuses, transport failures)
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockDiscoveryGateway::new()
//!     .with_validation(ValidationResult::new(ValidationStatus::Valid, "ok"))
//!     .with_error(MockError::RateLimited);
//!
//! gateway.validate_company("Acme").await?;
//! assert_eq!(gateway.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::company::{CompanyDetails, CompanyProfile, ResearchBundle, ValidationResult};
use crate::domain::recommendation::Recommendations;
use crate::domain::roi::{CatalogRoiInput, DefaultRoiInput, RoiResult};
use crate::ports::{DiscoveryGateway, Endpoint, GatewayError};

/// Mock gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct MockDiscoveryGateway {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Simulated latency per call.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    Validation(ValidationResult),
    Details(CompanyDetails),
    Research(ResearchBundle),
    Recommendations(Recommendations),
    Roi(RoiResult),
    /// Fail whichever call consumes this reply.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulate a 429.
    RateLimited,
    /// Simulate another non-2xx status.
    Failed { status: u16 },
    /// Simulate a connection failure.
    Transport,
}

impl MockError {
    fn into_gateway_error(self, endpoint: Endpoint) -> GatewayError {
        match self {
            MockError::RateLimited => GatewayError::from_status(endpoint, 429),
            MockError::Failed { status } => GatewayError::from_status(endpoint, status),
            MockError::Transport => GatewayError::transport(endpoint, "mock connection refused"),
        }
    }
}

/// A call received by the mock, with its request.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ValidateCompany {
        company_name: String,
    },
    InferCompanyDetails {
        company_name: String,
    },
    PreEngagementAnalysis {
        profile: CompanyProfile,
    },
    AiRecommendations {
        profile: CompanyProfile,
        selected_hypotheses: Vec<String>,
    },
    ProjectRoi(DefaultRoiInput),
    CatalogRoi(CatalogRoiInput),
}

impl RecordedCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RecordedCall::ValidateCompany { .. } => Endpoint::ValidateCompany,
            RecordedCall::InferCompanyDetails { .. } => Endpoint::InferCompanyDetails,
            RecordedCall::PreEngagementAnalysis { .. } => Endpoint::PreEngagementAnalysis,
            RecordedCall::AiRecommendations { .. } => Endpoint::AiRecommendations,
            RecordedCall::ProjectRoi(_) => Endpoint::ProjectRoi,
            RecordedCall::CatalogRoi(_) => Endpoint::CatalogRoi,
        }
    }
}

/// Recovers the guard of a poisoned lock; the mock's state stays usable
/// after a panicking test thread.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDiscoveryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reply to the queue.
    pub fn with_reply(self, reply: MockReply) -> Self {
        lock(&self.replies).push_back(reply);
        self
    }

    pub fn with_validation(self, result: ValidationResult) -> Self {
        self.with_reply(MockReply::Validation(result))
    }

    pub fn with_details(self, details: CompanyDetails) -> Self {
        self.with_reply(MockReply::Details(details))
    }

    pub fn with_research(self, bundle: ResearchBundle) -> Self {
        self.with_reply(MockReply::Research(bundle))
    }

    pub fn with_recommendations(self, recommendations: Recommendations) -> Self {
        self.with_reply(MockReply::Recommendations(recommendations))
    }

    pub fn with_roi(self, result: RoiResult) -> Self {
        self.with_reply(MockReply::Roi(result))
    }

    /// Adds an error reply to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.with_reply(MockReply::Error(error))
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on an existing (possibly shared) mock.
    pub fn push_reply(&self, reply: MockReply) {
        lock(&self.replies).push_back(reply);
    }

    /// Returns the number of calls made to this gateway.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Returns the endpoints called, in order.
    pub fn endpoints_called(&self) -> Vec<Endpoint> {
        lock(&self.calls).iter().map(RecordedCall::endpoint).collect()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Number of replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        lock(&self.replies).len()
    }

    async fn record(&self, call: RecordedCall) -> (Endpoint, Option<MockReply>) {
        let endpoint = call.endpoint();
        lock(&self.calls).push(call);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let reply = lock(&self.replies).pop_front();
        (endpoint, reply)
    }
}

fn unexpected(endpoint: Endpoint, reply: Option<MockReply>) -> GatewayError {
    match reply {
        Some(MockReply::Error(error)) => error.into_gateway_error(endpoint),
        Some(other) => {
            GatewayError::decode(endpoint, format!("mock reply does not fit: {:?}", other))
        }
        None => GatewayError::decode(endpoint, "no mock reply queued"),
    }
}

#[async_trait]
impl DiscoveryGateway for MockDiscoveryGateway {
    async fn validate_company(&self, company_name: &str) -> Result<ValidationResult, GatewayError> {
        let call = RecordedCall::ValidateCompany {
            company_name: company_name.to_string(),
        };
        match self.record(call).await {
            (_, Some(MockReply::Validation(result))) => Ok(result),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }

    async fn infer_company_details(
        &self,
        company_name: &str,
    ) -> Result<CompanyDetails, GatewayError> {
        let call = RecordedCall::InferCompanyDetails {
            company_name: company_name.to_string(),
        };
        match self.record(call).await {
            (_, Some(MockReply::Details(details))) => Ok(details),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }

    async fn pre_engagement_analysis(
        &self,
        profile: &CompanyProfile,
    ) -> Result<ResearchBundle, GatewayError> {
        let call = RecordedCall::PreEngagementAnalysis {
            profile: profile.clone(),
        };
        match self.record(call).await {
            (_, Some(MockReply::Research(bundle))) => Ok(bundle),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }

    async fn recommend_projects(
        &self,
        profile: &CompanyProfile,
        selected_hypotheses: &[String],
    ) -> Result<Recommendations, GatewayError> {
        let call = RecordedCall::AiRecommendations {
            profile: profile.clone(),
            selected_hypotheses: selected_hypotheses.to_vec(),
        };
        match self.record(call).await {
            (_, Some(MockReply::Recommendations(recommendations))) => Ok(recommendations),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }

    async fn project_roi(&self, input: &DefaultRoiInput) -> Result<RoiResult, GatewayError> {
        match self.record(RecordedCall::ProjectRoi(input.clone())).await {
            (_, Some(MockReply::Roi(result))) => Ok(result),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }

    async fn catalog_roi(&self, input: &CatalogRoiInput) -> Result<RoiResult, GatewayError> {
        match self.record(RecordedCall::CatalogRoi(input.clone())).await {
            (_, Some(MockReply::Roi(result))) => Ok(result),
            (endpoint, reply) => Err(unexpected(endpoint, reply)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::ValidationStatus;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let gateway = MockDiscoveryGateway::new()
            .with_validation(ValidationResult::new(ValidationStatus::Valid, "first"))
            .with_validation(ValidationResult::new(ValidationStatus::Invalid, "second"));

        let first = gateway.validate_company("Acme").await.unwrap();
        let second = gateway.validate_company("Acme").await.unwrap();

        assert_eq!(first.message, "first");
        assert_eq!(second.status, ValidationStatus::Invalid);
        assert_eq!(gateway.pending_replies(), 0);
    }

    #[tokio::test]
    async fn calls_are_recorded_with_their_requests() {
        let gateway = MockDiscoveryGateway::new();
        let _ = gateway.infer_company_details("Acme").await;

        assert_eq!(gateway.call_count(), 1);
        assert_eq!(
            gateway.get_calls(),
            vec![RecordedCall::InferCompanyDetails {
                company_name: "Acme".to_string()
            }]
        );
        assert_eq!(gateway.endpoints_called(), vec![Endpoint::InferCompanyDetails]);
    }

    #[tokio::test]
    async fn injected_rate_limit_is_classified() {
        let gateway = MockDiscoveryGateway::new().with_error(MockError::RateLimited);
        let err = gateway.validate_company("Acme").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::RateLimited {
                endpoint: Endpoint::ValidateCompany
            }
        );
    }

    #[tokio::test]
    async fn empty_queue_is_a_decode_error() {
        let gateway = MockDiscoveryGateway::new();
        let err = gateway.validate_company("Acme").await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode { .. }));
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let gateway = MockDiscoveryGateway::new();
        let shared = gateway.clone();
        shared.push_reply(MockReply::Validation(ValidationResult::new(
            ValidationStatus::Valid,
            "ok",
        )));

        gateway.validate_company("Acme").await.unwrap();
        assert_eq!(shared.call_count(), 1);
        shared.clear_calls();
        assert_eq!(gateway.call_count(), 0);
    }
}
