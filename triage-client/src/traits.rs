use crate::error::{StorageError, SubmissionError};
use crate::types::{ClassificationPayload, Submission};
use std::future::Future;

/// Network collaborator that talks to the classification service
pub trait ClassificationClient: Send + Sync {
    /// Submit content and return the unstamped classification
    fn submit(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = std::result::Result<ClassificationPayload, SubmissionError>> + Send;

    /// Check that the service is reachable and healthy
    fn health(&self) -> impl Future<Output = std::result::Result<(), SubmissionError>> + Send;
}

/// Session-scoped key-value store holding serialized state
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    fn remove(&self, key: &str) -> std::result::Result<(), StorageError>;
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Trait for configuration validation
pub trait ConfigValidator: Send + Sync {
    type Config;

    /// Validate configuration
    fn validate(&self, config: &Self::Config) -> crate::error::Result<()>;
}
