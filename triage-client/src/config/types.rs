use crate::catalog::Locale;
use crate::error::Result;
use crate::persistence::HISTORY_KEY;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default service location when no environment override is present
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout (60 s)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Path of the submission endpoint, relative to the base URL
pub const PROCESS_PATH: &str = "api/v1/process";

/// Path of the health endpoint, relative to the base URL
pub const HEALTH_PATH: &str = "health";

/// Environment variables consulted for the base URL, in priority order
pub const BASE_URL_ENV_VARS: [&str; 2] = ["TRIAGE_API_URL", "VITE_API_URL"];

/// Client configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the classification service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Session storage key for history
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Language of user-facing error messages
    #[serde(default)]
    pub locale: Locale,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_storage_key() -> String {
    HISTORY_KEY.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            storage_key: default_storage_key(),
            locale: Locale::default(),
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Full URL of `POST /api/v1/process`
    pub fn process_url(&self) -> Result<Url> {
        self.endpoint(PROCESS_PATH)
    }

    /// Full URL of `GET /health`
    pub fn health_url(&self) -> Result<Url> {
        self.endpoint(HEALTH_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }
}
