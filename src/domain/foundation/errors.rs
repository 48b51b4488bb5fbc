//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors
    EmptyInput,
    InvalidInput,

    // Workflow state errors
    InvalidStateTransition,
    CallInFlight,
    NoSelection,
    NotReady,

    // ROI errors
    RoiSchemaMissing,

    // Gateway errors
    RateLimited,
    CallFailed,
    TransportError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyInput => "EMPTY_INPUT",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::CallInFlight => "CALL_IN_FLIGHT",
            ErrorCode::NoSelection => "NO_SELECTION",
            ErrorCode::NotReady => "NOT_READY",
            ErrorCode::RoiSchemaMissing => "ROI_SCHEMA_MISSING",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::CallFailed => "CALL_FAILED",
            ErrorCode::TransportError => "TRANSPORT_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("company_name");
        assert_eq!(format!("{}", err), "Field 'company_name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("current_accuracy", 0.0, 100.0, 150.0);
        assert_eq!(
            format!("{}", err),
            "Field 'current_accuracy' must be between 0 and 100, got 150"
        );
    }

    #[test]
    fn validation_error_reports_its_field() {
        let err = ValidationError::invalid_format("step", "must be positive");
        assert_eq!(err.field(), "step");
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::CallInFlight), "CALL_IN_FLIGHT");
        assert_eq!(format!("{}", ErrorCode::RateLimited), "RATE_LIMITED");
    }
}
