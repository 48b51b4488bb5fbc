//! Analysis service gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Where the analysis endpoints live and how we identify ourselves.
///
/// No timeout setting: calls run until the service answers.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Root URL of the endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every call
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("gateway.base_url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_agent() -> String {
    format!("company-discovery/{}", env!("CARGO_PKG_VERSION"))
}
