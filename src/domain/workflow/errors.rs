//! Workflow error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::roi::RoiError;
use crate::ports::{Endpoint, GatewayError};

use super::Phase;

const ROI_FAILURE: &str = "Error calculating ROI. Please check your inputs and try again.";

/// Errors raised while driving a discovery session.
///
/// Local errors (`EmptyInput`, the ROI form errors, and the state guards)
/// are raised before any call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("company name is empty")]
    EmptyInput,

    #[error("{0}: rate limited")]
    RateLimited(Endpoint),

    #[error("{0}: failed with status {1}")]
    CallFailed(Endpoint, u16),

    /// No usable response: connection failure or an unreadable body.
    #[error("{0}: {1}")]
    Transport(Endpoint, String),

    #[error("no ROI calculator for project '{0}'")]
    RoiSchemaMissing(String),

    #[error("invalid ROI input for '{0}'")]
    RoiInputInvalid(String),

    #[error("cannot go from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },

    #[error("a call is already in flight in {0}")]
    CallInFlight(Phase),

    #[error("no hypotheses selected")]
    NoHypothesesSelected,

    #[error("not ready: {0}")]
    NotReady(String),
}

impl WorkflowError {
    pub fn not_ready(reason: impl Into<String>) -> Self {
        WorkflowError::NotReady(reason.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::EmptyInput => ErrorCode::EmptyInput,
            WorkflowError::RateLimited(_) => ErrorCode::RateLimited,
            WorkflowError::CallFailed(..) => ErrorCode::CallFailed,
            WorkflowError::Transport(..) => ErrorCode::TransportError,
            WorkflowError::RoiSchemaMissing(_) => ErrorCode::RoiSchemaMissing,
            WorkflowError::RoiInputInvalid(_) => ErrorCode::InvalidInput,
            WorkflowError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            WorkflowError::CallInFlight(_) => ErrorCode::CallInFlight,
            WorkflowError::NoHypothesesSelected => ErrorCode::NoSelection,
            WorkflowError::NotReady(_) => ErrorCode::NotReady,
        }
    }

    /// The endpoint involved, for boundary errors.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            WorkflowError::RateLimited(endpoint)
            | WorkflowError::CallFailed(endpoint, _)
            | WorkflowError::Transport(endpoint, _) => Some(*endpoint),
            _ => None,
        }
    }

    /// True for failures of an issued call.
    pub fn is_boundary(&self) -> bool {
        self.endpoint().is_some()
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::EmptyInput => "Please enter a company name.".to_string(),
            WorkflowError::RateLimited(endpoint) => endpoint.failure_message(true).to_string(),
            WorkflowError::CallFailed(endpoint, _) | WorkflowError::Transport(endpoint, _) => {
                endpoint.failure_message(false).to_string()
            }
            WorkflowError::RoiSchemaMissing(_) => {
                "ROI calculator configuration not found for this project.".to_string()
            }
            WorkflowError::RoiInputInvalid(_) => ROI_FAILURE.to_string(),
            WorkflowError::NoHypothesesSelected => {
                "Please select at least one hypothesis to validate.".to_string()
            }
            WorkflowError::InvalidTransition { .. }
            | WorkflowError::CallInFlight(_)
            | WorkflowError::NotReady(_) => {
                let mut message = self.to_string();
                if let Some(first) = message.get_mut(0..1) {
                    first.make_ascii_uppercase();
                }
                message
            }
        }
    }
}

impl From<GatewayError> for WorkflowError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::RateLimited { endpoint } => WorkflowError::RateLimited(endpoint),
            GatewayError::CallFailed { endpoint, status } => {
                WorkflowError::CallFailed(endpoint, status)
            }
            GatewayError::Transport { endpoint, message } => {
                WorkflowError::Transport(endpoint, message)
            }
            GatewayError::Decode { endpoint, message } => {
                WorkflowError::Transport(endpoint, format!("unexpected response body: {}", message))
            }
        }
    }
}

impl From<RoiError> for WorkflowError {
    fn from(err: RoiError) -> Self {
        match err {
            RoiError::InputInvalid(variable) => WorkflowError::RoiInputInvalid(variable),
        }
    }
}
