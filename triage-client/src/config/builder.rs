use crate::catalog::Locale;
use crate::config::types::ClientConfig;
use crate::error::Result;

/// Builder for ClientConfig
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Start from the environment-derived configuration
    pub fn from_env() -> Self {
        Self {
            config: ClientConfig::from_env(),
        }
    }

    #[must_use]
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set timeout in seconds
    #[must_use]
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn storage_key<S: Into<String>>(mut self, key: S) -> Self {
        self.config.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid (bad URL, zero timeout, empty key)
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
