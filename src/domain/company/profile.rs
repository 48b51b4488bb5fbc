//! Company name and profile value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A company name as typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    /// Parses a raw form value.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is empty or only whitespace
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("company_name"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of the detail-inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDetails {
    pub industry: String,
    pub company_size: String,
    pub description: String,
    pub confidence: Option<f64>,
}

/// Attributes inferred for a validated company.
///
/// Built once the detail-inference call resolves; never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    name: String,
    industry: String,
    size: String,
    description: Option<String>,
    confidence: Option<f64>,
}

impl CompanyProfile {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            size: size.into(),
            description: None,
            confidence: None,
        }
    }

    /// Combines the validated name with inferred details.
    pub fn from_details(name: impl Into<String>, details: CompanyDetails) -> Self {
        let profile = Self::new(name, details.industry, details.company_size)
            .with_description(details.description);
        match details.confidence {
            Some(confidence) => profile.with_confidence(confidence),
            None => profile,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }
}
