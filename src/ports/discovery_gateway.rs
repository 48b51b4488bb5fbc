//! Discovery Gateway Port - Interface to the analysis endpoints.
//!
//! The six endpoints that validate names, infer details, research, recommend,
//! and compute ROI sit behind this port. The workflow never sees HTTP: it
//! sees domain values or a classified [`GatewayError`].
//!
//! # Design
//!
//! - One method per endpoint, all asynchronous and non-cancelable
//! - No client-side retries; the service applies its own backoff behind 429
//! - Non-2xx responses are classified by status: 429 is rate-limited,
//!   anything else a generic failure
//!
//! # Example
//!
//! ```ignore
//! let gateway: Arc<dyn DiscoveryGateway> = Arc::new(MockDiscoveryGateway::new()
//!     .with_validation(ValidationResult::new(ValidationStatus::Valid, "ok")));
//!
//! let result = gateway.validate_company("Acme").await?;
//! ```

use async_trait::async_trait;
use std::fmt;

use crate::domain::company::{
    CompanyDetails, CompanyProfile, ResearchBundle, ValidationResult,
};
use crate::domain::recommendation::Recommendations;
use crate::domain::roi::{CatalogRoiInput, DefaultRoiInput, RoiResult};

/// Port for the analysis service.
#[async_trait]
pub trait DiscoveryGateway: Send + Sync {
    /// `POST /validate-company` with `{company_name}`.
    async fn validate_company(&self, company_name: &str) -> Result<ValidationResult, GatewayError>;

    /// `POST /infer-company-details` with `{company_name}`.
    async fn infer_company_details(&self, company_name: &str)
        -> Result<CompanyDetails, GatewayError>;

    /// `POST /pre-engagement-analysis` with the full company profile.
    async fn pre_engagement_analysis(
        &self,
        profile: &CompanyProfile,
    ) -> Result<ResearchBundle, GatewayError>;

    /// `POST /ai-recommendations` with `{company_info, selected_hypotheses}`.
    async fn recommend_projects(
        &self,
        profile: &CompanyProfile,
        selected_hypotheses: &[String],
    ) -> Result<Recommendations, GatewayError>;

    /// `POST /project-roi?industry=..&company_size=..` with the six default inputs.
    async fn project_roi(&self, input: &DefaultRoiInput) -> Result<RoiResult, GatewayError>;

    /// `POST /catalog-roi` with `{roi_config, variable_values}`.
    async fn catalog_roi(&self, input: &CatalogRoiInput) -> Result<RoiResult, GatewayError>;
}

/// The analysis endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ValidateCompany,
    InferCompanyDetails,
    PreEngagementAnalysis,
    AiRecommendations,
    ProjectRoi,
    CatalogRoi,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ValidateCompany => "/validate-company",
            Endpoint::InferCompanyDetails => "/infer-company-details",
            Endpoint::PreEngagementAnalysis => "/pre-engagement-analysis",
            Endpoint::AiRecommendations => "/ai-recommendations",
            Endpoint::ProjectRoi => "/project-roi",
            Endpoint::CatalogRoi => "/catalog-roi",
        }
    }

    /// Message shown in place of the phase content after a failed call.
    pub fn failure_message(&self, rate_limited: bool) -> &'static str {
        match (self, rate_limited) {
            (Endpoint::ValidateCompany, true) => {
                "API quota exceeded. The system is automatically retrying. This may take a few minutes..."
            }
            (Endpoint::ValidateCompany, false) => "Failed to validate company name. Please try again.",
            (Endpoint::InferCompanyDetails | Endpoint::PreEngagementAnalysis, true) => {
                "API quota exceeded. The system is automatically retrying with exponential backoff. \
                 This process may take several minutes due to rate limits."
            }
            (Endpoint::InferCompanyDetails | Endpoint::PreEngagementAnalysis, false) => {
                "Failed to analyze company. Please check the company name and try again."
            }
            (Endpoint::AiRecommendations, true) => {
                "API quota exceeded. The system has attempted multiple retries with exponential \
                 backoff. Please try again in a few hours when the quota resets."
            }
            (Endpoint::AiRecommendations, false) => {
                "Failed to generate AI project recommendations. Please try again."
            }
            (Endpoint::ProjectRoi | Endpoint::CatalogRoi, _) => {
                "Error calculating ROI. Please check your inputs and try again."
            }
        }
    }

    /// Loading text while a call is outstanding.
    pub fn loading_message(&self) -> &'static str {
        match self {
            Endpoint::ValidateCompany => "Validating company name...",
            Endpoint::InferCompanyDetails => "Analyzing company details...",
            Endpoint::PreEngagementAnalysis => {
                "Conducting pre-engagement research and hypothesis generation..."
            }
            Endpoint::AiRecommendations => {
                "Generating AI project recommendations based on validated hypotheses..."
            }
            Endpoint::ProjectRoi | Endpoint::CatalogRoi => "Calculating...",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().trim_start_matches('/'))
    }
}

/// Classification of an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    RateLimited,
    Failure,
}

impl CallOutcome {
    pub fn classify(status: u16) -> Self {
        match status {
            200..=299 => CallOutcome::Success,
            429 => CallOutcome::RateLimited,
            _ => CallOutcome::Failure,
        }
    }
}

/// Gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The service answered 429.
    #[error("{endpoint}: rate limited")]
    RateLimited { endpoint: Endpoint },

    /// The service answered with another non-2xx status.
    #[error("{endpoint}: failed with status {status}")]
    CallFailed { endpoint: Endpoint, status: u16 },

    /// No response was received.
    #[error("{endpoint}: transport error: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// A 2xx response whose body did not match the endpoint contract.
    #[error("{endpoint}: unexpected response body: {message}")]
    Decode { endpoint: Endpoint, message: String },
}

impl GatewayError {
    /// Builds the error for a non-2xx status.
    pub fn from_status(endpoint: Endpoint, status: u16) -> Self {
        if CallOutcome::classify(status) == CallOutcome::RateLimited {
            GatewayError::RateLimited { endpoint }
        } else {
            GatewayError::CallFailed { endpoint, status }
        }
    }

    pub fn transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        GatewayError::Transport {
            endpoint,
            message: message.into(),
        }
    }

    pub fn decode(endpoint: Endpoint, message: impl Into<String>) -> Self {
        GatewayError::Decode {
            endpoint,
            message: message.into(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            GatewayError::RateLimited { endpoint }
            | GatewayError::CallFailed { endpoint, .. }
            | GatewayError::Transport { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => *endpoint,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited { .. })
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::RateLimited { .. } => Some(429),
            GatewayError::CallFailed { status, .. } => Some(*status),
            GatewayError::Transport { .. } | GatewayError::Decode { .. } => None,
        }
    }

    /// Status-aware message for the user.
    pub fn user_message(&self) -> &'static str {
        self.endpoint().failure_message(self.is_rate_limited())
    }
}
