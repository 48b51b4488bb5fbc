//! ROI form errors. They are local and never reach the network layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoiError {
    /// A submitted value is missing, unparseable, or outside its bounds.
    #[error("Invalid value for {0}")]
    InputInvalid(String),
}
