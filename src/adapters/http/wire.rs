//! Wire formats of the analysis endpoints.
//!
//! Request bodies serialize from domain values; response bodies deserialize
//! leniently (missing lists default to empty) and are converted to domain
//! values at this boundary. ROI results are tagged here and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::company::{
    CompanyDetails, CompanyProfile, Hypothesis, ResearchBundle, ValidationResult,
    ValidationStatus,
};
use crate::domain::recommendation::{Project, Recommendations};
use crate::domain::roi::{
    CatalogRoiInput, CatalogRoiResult, DefaultRoiInput, DefaultRoiResult, RoiResult, RoiSchema,
};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct CompanyNameRequest<'a> {
    pub company_name: &'a str,
}

/// Company profile as the service expects it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo<'a> {
    pub company_name: &'a str,
    pub industry: &'a str,
    pub company_size: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl<'a> From<&'a CompanyProfile> for CompanyInfo<'a> {
    fn from(profile: &'a CompanyProfile) -> Self {
        Self {
            company_name: profile.name(),
            industry: profile.industry(),
            company_size: profile.size(),
            description: profile.description(),
            confidence: profile.confidence(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsRequest<'a> {
    pub company_info: CompanyInfo<'a>,
    pub selected_hypotheses: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct ProjectRoiRequest<'a> {
    pub project_title: &'a str,
    pub current_process_cost: f64,
    pub current_accuracy: f64,
    pub current_processing_time: f64,
    pub expected_improvement: f64,
    pub implementation_cost: f64,
    pub annual_operating_cost: f64,
}

impl<'a> From<&'a DefaultRoiInput> for ProjectRoiRequest<'a> {
    fn from(input: &'a DefaultRoiInput) -> Self {
        Self {
            project_title: &input.project_title,
            current_process_cost: input.current_process_cost,
            current_accuracy: input.current_accuracy,
            current_processing_time: input.current_processing_time,
            expected_improvement: input.expected_improvement,
            implementation_cost: input.implementation_cost,
            annual_operating_cost: input.annual_operating_cost,
        }
    }
}

/// Query parameters of the default calculator.
pub fn project_roi_query(input: &DefaultRoiInput) -> [(&'static str, &str); 2] {
    [
        ("industry", input.industry.as_str()),
        ("company_size", input.company_size.as_str()),
    ]
}

#[derive(Debug, Serialize)]
pub struct CatalogRoiRequest<'a> {
    /// The calculator object exactly as received with the project.
    pub roi_config: &'a Value,
    pub variable_values: Map<String, Value>,
}

impl<'a> From<&'a CatalogRoiInput> for CatalogRoiRequest<'a> {
    fn from(input: &'a CatalogRoiInput) -> Self {
        let variable_values = input
            .variable_values
            .iter()
            .map(|(name, value)| (name.clone(), Value::from(*value)))
            .collect();
        Self {
            roi_config: input.schema.config(),
            variable_values,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ValidationDto {
    pub status: ValidationStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
}

impl From<ValidationDto> for ValidationResult {
    fn from(dto: ValidationDto) -> Self {
        let mut result = ValidationResult::new(dto.status, dto.message);
        result.confidence = dto.confidence;
        result.sources = dto.sources.unwrap_or_default();
        result.suggestions = dto.suggestions.unwrap_or_default();
        result.company_name = dto.company_name.filter(|n| !n.trim().is_empty());
        result.original_name = dto.original_name.filter(|n| !n.trim().is_empty());
        result
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailsDto {
    pub industry: String,
    pub company_size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl From<DetailsDto> for CompanyDetails {
    fn from(dto: DetailsDto) -> Self {
        CompanyDetails {
            industry: dto.industry,
            company_size: dto.company_size,
            description: dto.description,
            confidence: dto.confidence,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HypothesisDto {
    pub hypothesis: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub ai_opportunity: String,
}

#[derive(Debug, Deserialize)]
pub struct ResearchDto {
    #[serde(default)]
    pub research_findings: Vec<String>,
    #[serde(default)]
    pub strategic_hypotheses: Vec<HypothesisDto>,
}

impl From<ResearchDto> for ResearchBundle {
    fn from(dto: ResearchDto) -> Self {
        let hypotheses = dto
            .strategic_hypotheses
            .into_iter()
            .map(|h| Hypothesis::new(h.hypothesis, h.rationale, h.ai_opportunity))
            .collect();
        ResearchBundle::new(dto.research_findings, hypotheses)
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub investment_range: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub roi_calculator: Option<Value>,
    #[serde(default)]
    pub hypothesis_alignment: Option<Value>,
    #[serde(default)]
    pub expected_roi: Option<Value>,
    #[serde(default)]
    pub business_value: Option<Value>,
    #[serde(default)]
    pub implementation_notes: Option<Value>,
}

impl ProjectDto {
    /// Converts to a project, validating its calculator schema.
    ///
    /// A calculator without `variables` means the default calculator. A
    /// malformed one is dropped with a warning and the default calculator
    /// applies.
    pub fn into_project(self) -> Project {
        let schema = self.roi_calculator.as_ref().and_then(|raw| {
            if raw.get("variables").is_none() {
                return None;
            }
            match RoiSchema::from_value(raw) {
                Ok(schema) => Some(schema),
                Err(e) => {
                    tracing::warn!(
                        "Dropping malformed ROI calculator for project '{}': {}",
                        self.title,
                        e
                    );
                    None
                }
            }
        });

        Project {
            title: self.title,
            description: self.description,
            timeline: self.timeline,
            investment_range: self.investment_range,
            priority: self.priority,
            roi_calculator: schema,
            hypothesis_alignment: text_of(self.hypothesis_alignment),
            expected_roi: text_of(self.expected_roi),
            business_value: text_of(self.business_value),
            implementation_notes: text_of(self.implementation_notes),
        }
    }
}

/// Free-text fields sometimes arrive as numbers or lists.
fn text_of(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsDto {
    #[serde(default)]
    pub aligned_projects: Vec<ProjectDto>,
    #[serde(default)]
    pub filler_projects: Vec<ProjectDto>,
}

impl From<RecommendationsDto> for Recommendations {
    fn from(dto: RecommendationsDto) -> Self {
        Recommendations::new(
            dto.aligned_projects
                .into_iter()
                .map(ProjectDto::into_project)
                .collect(),
            dto.filler_projects
                .into_iter()
                .map(ProjectDto::into_project)
                .collect(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct DefaultRoiDto {
    #[serde(default)]
    pub project_title: String,
    pub roi_percentage: f64,
    pub annual_savings: f64,
    pub payback_months: f64,
    pub three_year_npv: f64,
    pub current_annual_cost: f64,
    pub ai_annual_cost: f64,
    #[serde(default)]
    pub accuracy_improvement: String,
    #[serde(default)]
    pub speed_improvement: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogRoiDto {
    pub roi_percentage: f64,
    pub annual_benefit: f64,
    #[serde(default)]
    pub breakeven_months: Option<f64>,
    pub three_year_npv: f64,
    pub variables_used: Map<String, Value>,
}

/// Tags an ROI response by shape: `variables_used` present means catalog.
pub fn tag_roi_result(body: Value) -> Result<RoiResult, serde_json::Error> {
    if body.get("variables_used").is_some() {
        let dto: CatalogRoiDto = serde_json::from_value(body)?;
        let variables_used = dto
            .variables_used
            .into_iter()
            .filter_map(|(name, value)| value.as_f64().map(|v| (name, v)))
            .collect();
        Ok(RoiResult::Catalog(CatalogRoiResult {
            roi_percentage: dto.roi_percentage,
            annual_benefit: dto.annual_benefit,
            breakeven_months: dto.breakeven_months,
            three_year_npv: dto.three_year_npv,
            variables_used,
        }))
    } else {
        let dto: DefaultRoiDto = serde_json::from_value(body)?;
        Ok(RoiResult::Default(DefaultRoiResult {
            project_title: dto.project_title,
            roi_percentage: dto.roi_percentage,
            annual_savings: dto.annual_savings,
            payback_months: dto.payback_months,
            three_year_npv: dto.three_year_npv,
            current_annual_cost: dto.current_annual_cost,
            ai_annual_cost: dto.ai_annual_cost,
            accuracy_improvement: dto.accuracy_improvement,
            speed_improvement: dto.speed_improvement,
        }))
    }
}
