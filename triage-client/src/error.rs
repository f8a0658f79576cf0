use crate::types::ServiceErrorEnvelope;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for triage-client operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Errors returned by the fallible parts of the library (configuration, client setup)
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl TriageError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Failure of a single submission, as reported by the network collaborator.
///
/// The session manager branches on the variant; it never inspects the
/// underlying transport error.
#[derive(Debug, Clone, Error)]
pub enum SubmissionError {
    /// The service answered with a non-2xx status. `error_code` and `message`
    /// are taken from the error envelope when the body carries them.
    #[error("service responded with status {status}")]
    Server {
        status: u16,
        error_code: Option<String>,
        message: Option<String>,
    },

    /// No response arrived: connection refused, DNS failure or timeout.
    #[error("no response from service: {reason}")]
    NoResponse { reason: String, timed_out: bool },

    /// Anything else, e.g. a 2xx response whose body cannot be decoded.
    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl SubmissionError {
    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Server failure built from a complete error envelope
    pub fn from_envelope(status: u16, envelope: ServiceErrorEnvelope) -> Self {
        Self::Server {
            status,
            error_code: Some(envelope.error_code),
            message: Some(envelope.message),
        }
    }

    /// Error code carried by the server envelope, if any
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Server { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

/// Failures of the session-scoped key-value store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage quota exceeded: {required} bytes needed, {quota} available")]
    QuotaExceeded { required: usize, quota: usize },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
