//! Company name validation outcome.
//!
//! A `ValidationResult` is produced by the validate-company call. An
//! `Ambiguous` result offers suggestions; choosing one synthesizes a `Valid`
//! result locally, without another round trip.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Outcome category of a name validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Ambiguous,
    Invalid,
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Ambiguous => "ambiguous",
            ValidationStatus::Invalid => "invalid",
        };
        write!(f, "{}", s)
    }
}

/// Banner style used when showing a validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBanner {
    Success,
    Warning,
    Error,
}

/// Coarse confidence band for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    /// Bands a 0-100 confidence score: 80 and above is high, 50 and above medium.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ConfidenceLevel::High
        } else if score >= 50.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Result of validating a company name.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub message: String,
    pub confidence: Option<f64>,
    pub sources: Vec<String>,
    pub suggestions: Vec<String>,
    /// Canonical name reported by the validator, if any.
    pub company_name: Option<String>,
    /// Name as originally submitted, echoed back by the validator.
    pub original_name: Option<String>,
}

impl ValidationResult {
    pub fn new(status: ValidationStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            confidence: None,
            sources: Vec::new(),
            suggestions: Vec::new(),
            company_name: None,
            original_name: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }

    /// Suggestions are only offered for ambiguous results.
    pub fn offered_suggestions(&self) -> &[String] {
        if self.status == ValidationStatus::Ambiguous {
            &self.suggestions
        } else {
            &[]
        }
    }

    /// Resolves an ambiguous result to the suggestion the user picked.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `suggestion` is not one of the offered suggestions
    pub fn choose_suggestion(&self, suggestion: &str) -> Result<ValidationResult, ValidationError> {
        if !self.offered_suggestions().iter().any(|s| s == suggestion) {
            return Err(ValidationError::invalid_format(
                "suggestion",
                format!("'{}' is not an offered suggestion", suggestion),
            ));
        }

        let mut chosen = ValidationResult::new(
            ValidationStatus::Valid,
            format!("Selected: {}", suggestion),
        );
        chosen.company_name = Some(suggestion.to_string());
        Ok(chosen)
    }

    /// Name to carry into research: the canonical name, else the echoed
    /// original, else what the user typed.
    pub fn resolved_name<'a>(&'a self, submitted: &'a str) -> &'a str {
        self.company_name
            .as_deref()
            .or(self.original_name.as_deref())
            .unwrap_or(submitted)
    }

    pub fn banner(&self) -> StatusBanner {
        match self.status {
            ValidationStatus::Valid => StatusBanner::Success,
            ValidationStatus::Ambiguous => StatusBanner::Warning,
            ValidationStatus::Invalid => StatusBanner::Error,
        }
    }

    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence.map(ConfidenceLevel::from_score)
    }

    /// "Verified via: ..." line, when any source was consulted.
    pub fn sources_line(&self) -> Option<String> {
        if self.sources.is_empty() {
            None
        } else {
            Some(format!("Verified via: {}", self.sources.join(", ")))
        }
    }
}
