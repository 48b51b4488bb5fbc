//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COMPANY_DISCOVERY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use company_discovery::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Analysis service at {}", config.gateway.base_url);
//! ```

mod error;
mod gateway;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every value has a default, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Analysis service location
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COMPANY_DISCOVERY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COMPANY_DISCOVERY__GATEWAY__BASE_URL=...` -> `gateway.base_url = ...`
    /// - `COMPANY_DISCOVERY__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPANY_DISCOVERY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("COMPANY_DISCOVERY__GATEWAY__BASE_URL");
        env::remove_var("COMPANY_DISCOVERY__GATEWAY__USER_AGENT");
        env::remove_var("COMPANY_DISCOVERY__LOGGING__FILTER");
        env::remove_var("COMPANY_DISCOVERY__LOGGING__JSON");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "http://localhost:8000");
        assert_eq!(config.logging.filter, "info,company_discovery=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COMPANY_DISCOVERY__GATEWAY__BASE_URL", "https://analysis.example.com");
        env::set_var("COMPANY_DISCOVERY__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "https://analysis.example.com");
        assert!(config.logging.json);
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COMPANY_DISCOVERY__GATEWAY__BASE_URL", "localhost:8000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }
}
