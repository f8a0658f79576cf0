//! Triage Client - session layer for a remote e-mail classification service
//!
//! Submits a file or raw text to the service, keeps the most-recent-first
//! classification history for the session, persists it to a session-scoped
//! store and turns service error codes into user-facing messages.

// Core modules
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Main functionality modules
pub mod catalog;
pub mod http;
pub mod persistence;
pub mod session;
pub mod storage;

pub mod testing;

// Re-export main types for convenience
pub use catalog::{resolve_error_message, Catalog, ErrorCode, Locale};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Result, StorageError, SubmissionError, TriageError};
pub use http::HttpClassificationClient;
pub use persistence::{HistoryPersistence, HISTORY_KEY};
pub use session::{AnalysisOutcome, AnalysisSession, FailureKind, SessionState};
pub use storage::MemoryStore;
pub use traits::{ClassificationClient, SessionStore};
pub use types::{
    Category, ClassificationPayload, ClassificationResult, ContentKind, ServiceErrorEnvelope,
    Submission,
};

/// Session wired to the HTTP client and an in-memory store
pub type DefaultSession = AnalysisSession<HttpClassificationClient, MemoryStore>;

/// Build a session from configuration and restore persisted history from `store`
pub fn create_session(config: ClientConfig, store: MemoryStore) -> Result<DefaultSession> {
    let client = HttpClassificationClient::new(config.clone())?;
    let session = AnalysisSession::with_config(client, store, &config);
    session.load_from_session();
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_session_restores_history() {
        let store = MemoryStore::new();
        let persisted = vec![testing::test_helpers::create_result("earlier", 3)];
        store
            .set(HISTORY_KEY, &serde_json::to_string(&persisted).unwrap())
            .unwrap();

        let session = create_session(ClientConfig::default(), store).unwrap();
        assert_eq!(session.history(), persisted);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_create_session_rejects_invalid_config() {
        let config = ClientConfig {
            base_url: String::new(),
            ..ClientConfig::default()
        };
        assert!(create_session(config, MemoryStore::new()).is_err());
    }
}
