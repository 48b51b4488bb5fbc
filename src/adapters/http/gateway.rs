//! HTTP Discovery Gateway - Implementation of DiscoveryGateway over reqwest.
//!
//! Every endpoint is a JSON POST under one base URL. Calls are issued once:
//! no client timeout and no retries, since the service applies its own
//! backoff behind 429.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GatewayConfig::new("http://localhost:8000")
//!     .with_user_agent("company-discovery/0.1.0");
//!
//! let gateway = HttpDiscoveryGateway::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::domain::company::{CompanyDetails, CompanyProfile, ResearchBundle, ValidationResult};
use crate::domain::recommendation::Recommendations;
use crate::domain::roi::{CatalogRoiInput, DefaultRoiInput, RoiResult};
use crate::ports::{CallOutcome, DiscoveryGateway, Endpoint, GatewayError};

use super::wire::{
    project_roi_query, tag_roi_result, CatalogRoiRequest, CompanyInfo, CompanyNameRequest,
    DetailsDto, ProjectRoiRequest, RecommendationsDto, RecommendationsRequest, ResearchDto,
    ValidationDto,
};

/// Configuration for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Root of the endpoints (e.g. "http://localhost:8000").
    pub base_url: String,
    pub user_agent: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: format!("company-discovery/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl From<&config::GatewayConfig> for GatewayConfig {
    fn from(settings: &config::GatewayConfig) -> Self {
        Self::new(settings.base_url.trim()).with_user_agent(settings.user_agent.clone())
    }
}

/// Analysis service client.
pub struct HttpDiscoveryGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpDiscoveryGateway {
    /// Creates a gateway.
    ///
    /// # Errors
    ///
    /// - `Transport` if the HTTP client cannot be built
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                GatewayError::transport(
                    Endpoint::ValidateCompany,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint.path())
    }

    fn post<B: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &B) -> RequestBuilder {
        self.client.post(self.url(endpoint)).json(body)
    }

    /// Sends a request and decodes a successful body.
    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        tracing::debug!("Calling {}", endpoint);

        let response = request.send().await.map_err(|e| {
            tracing::error!("Request to {} failed: {}", endpoint, e);
            if e.is_connect() {
                GatewayError::transport(endpoint, format!("Connection failed: {}", e))
            } else {
                GatewayError::transport(endpoint, e.to_string())
            }
        })?;

        let response = Self::check_status(endpoint, response)?;
        let body = response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", endpoint, e);
            GatewayError::decode(endpoint, e.to_string())
        })?;

        tracing::debug!("{} succeeded", endpoint);
        Ok(body)
    }

    fn check_status(endpoint: Endpoint, response: Response) -> Result<Response, GatewayError> {
        let status = response.status().as_u16();
        match CallOutcome::classify(status) {
            CallOutcome::Success => Ok(response),
            CallOutcome::RateLimited => {
                tracing::warn!("{} rate limited (status {})", endpoint, status);
                Err(GatewayError::from_status(endpoint, status))
            }
            CallOutcome::Failure => {
                tracing::warn!("{} returned status {}", endpoint, status);
                Err(GatewayError::from_status(endpoint, status))
            }
        }
    }

    async fn call_roi(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<RoiResult, GatewayError> {
        let body: Value = self.call(endpoint, request).await?;
        tag_roi_result(body).map_err(|e| {
            tracing::error!("Unexpected {} result shape: {}", endpoint, e);
            GatewayError::decode(endpoint, e.to_string())
        })
    }
}

#[async_trait]
impl DiscoveryGateway for HttpDiscoveryGateway {
    async fn validate_company(&self, company_name: &str) -> Result<ValidationResult, GatewayError> {
        let endpoint = Endpoint::ValidateCompany;
        let request = self.post(endpoint, &CompanyNameRequest { company_name });
        let dto: ValidationDto = self.call(endpoint, request).await?;
        Ok(dto.into())
    }

    async fn infer_company_details(
        &self,
        company_name: &str,
    ) -> Result<CompanyDetails, GatewayError> {
        let endpoint = Endpoint::InferCompanyDetails;
        let request = self.post(endpoint, &CompanyNameRequest { company_name });
        let dto: DetailsDto = self.call(endpoint, request).await?;
        Ok(dto.into())
    }

    async fn pre_engagement_analysis(
        &self,
        profile: &CompanyProfile,
    ) -> Result<ResearchBundle, GatewayError> {
        let endpoint = Endpoint::PreEngagementAnalysis;
        let request = self.post(endpoint, &CompanyInfo::from(profile));
        let dto: ResearchDto = self.call(endpoint, request).await?;
        Ok(dto.into())
    }

    async fn recommend_projects(
        &self,
        profile: &CompanyProfile,
        selected_hypotheses: &[String],
    ) -> Result<Recommendations, GatewayError> {
        let endpoint = Endpoint::AiRecommendations;
        let body = RecommendationsRequest {
            company_info: CompanyInfo::from(profile),
            selected_hypotheses,
        };
        let request = self.post(endpoint, &body);
        let dto: RecommendationsDto = self.call(endpoint, request).await?;
        Ok(dto.into())
    }

    async fn project_roi(&self, input: &DefaultRoiInput) -> Result<RoiResult, GatewayError> {
        let endpoint = Endpoint::ProjectRoi;
        let request = self
            .post(endpoint, &ProjectRoiRequest::from(input))
            .query(&project_roi_query(input));
        self.call_roi(endpoint, request).await
    }

    async fn catalog_roi(&self, input: &CatalogRoiInput) -> Result<RoiResult, GatewayError> {
        let endpoint = Endpoint::CatalogRoi;
        let request = self.post(endpoint, &CatalogRoiRequest::from(input));
        self.call_roi(endpoint, request).await
    }
}
