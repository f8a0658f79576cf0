use crate::config::types::{ClientConfig, BASE_URL_ENV_VARS};
use crate::config::validator::ConfigValidatorImpl;
use crate::error::{Result, TriageError};
use crate::traits::ConfigValidator;
use std::path::Path;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let content = std::fs::read_to_string(&path).map_err(|_| TriageError::ConfigNotFound {
            path: path.as_ref().to_path_buf(),
        })?;

        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration and validate it, with the file path in error messages
    fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(TriageError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(TriageError::Io)?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            TriageError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        ConfigValidatorImpl::new().validate_with_context(&config, path_ref)?;
        Ok(config)
    }
}

/// Resolve the base URL from a variable lookup, first non-empty value wins
pub fn base_url_from_lookup<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    BASE_URL_ENV_VARS
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> crate::config::builder::ClientConfigBuilder {
        crate::config::builder::ClientConfigBuilder::new()
    }

    /// Defaults with the base URL taken from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with the base URL taken from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = base_url_from_lookup(lookup) {
            log::debug!("Using classification service at {}", base_url);
            config.base_url = base_url;
        }
        config
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load and validate configuration from a TOML file
    pub fn load_with_validation<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }

    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidatorImpl::new().validate(self)
    }
}
