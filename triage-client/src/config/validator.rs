use crate::config::types::ClientConfig;
use crate::error::{Result, TriageError};
use crate::traits::ConfigValidator;
use std::path::Path;
use url::Url;

/// Upper bound on the request timeout; anything longer is a misconfiguration
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Configuration validator implementation
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = ClientConfig;

    fn validate(&self, config: &ClientConfig) -> Result<()> {
        self.validate_with_context(config, "configuration")
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }

    /// Validate, naming `config_path` in error messages
    pub fn validate_with_context<P: AsRef<Path>>(
        &self,
        config: &ClientConfig,
        config_path: P,
    ) -> Result<()> {
        let config_path_str = config_path.as_ref().to_string_lossy();

        if config.base_url.trim().is_empty() {
            return Err(TriageError::invalid_config(format!(
                "base_url is empty in {}",
                config_path_str
            )));
        }

        let url = Url::parse(&config.base_url).map_err(|e| {
            TriageError::invalid_config(format!(
                "base_url '{}' in {} is not a valid URL: {}",
                config.base_url, config_path_str, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(TriageError::invalid_config(format!(
                "base_url '{}' in {} must use http or https",
                config.base_url, config_path_str
            )));
        }

        if config.timeout_seconds == 0 || config.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(TriageError::invalid_config(format!(
                "timeout_seconds in {} must be between 1 and {}, got {}",
                config_path_str, MAX_TIMEOUT_SECONDS, config.timeout_seconds
            )));
        }

        if config.storage_key.trim().is_empty() {
            return Err(TriageError::invalid_config(format!(
                "storage_key is empty in {}",
                config_path_str
            )));
        }

        Ok(())
    }
}

impl Default for ConfigValidatorImpl {
    fn default() -> Self {
        Self::new()
    }
}
