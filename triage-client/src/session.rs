//! Analysis session manager.
//!
//! Owns the mutable session state (history, busy flag, last error) and runs
//! submissions against the classification service. Submissions are
//! single-flight: a call made while another is outstanding is rejected
//! without touching state.

use crate::catalog::{Catalog, ErrorCode};
use crate::config::ClientConfig;
use crate::error::SubmissionError;
use crate::persistence::HistoryPersistence;
use crate::traits::{ClassificationClient, SessionStore};
use crate::types::{ClassificationResult, Submission};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Observable state of a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Most recent first
    pub history: Vec<ClassificationResult>,
    pub is_busy: bool,
    pub last_error: Option<String>,
}

/// Which failure branch a submission ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service rejected the submitted content
    Validation,
    /// The service answered with any other error
    Service,
    /// No response was received, including timeouts
    Connectivity,
    Unexpected,
}

/// Result of a call to [`AnalysisSession::analyze_content`]
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(ClassificationResult),
    Failed { kind: FailureKind, message: String },
    /// Another submission was in flight; nothing happened
    Rejected,
}

impl AnalysisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Clears the busy flag when dropped, so it resets on every exit path
/// including cancellation of the submission future.
struct BusyGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.is_busy = false;
    }
}

/// Session manager bound to a classification client and a session store
pub struct AnalysisSession<C: ClassificationClient, S: SessionStore> {
    client: C,
    persistence: HistoryPersistence<S>,
    catalog: Catalog,
    state: Mutex<SessionState>,
}

impl<C: ClassificationClient, S: SessionStore> AnalysisSession<C, S> {
    /// Create a session with default storage key and locale. History starts
    /// empty until [`load_from_session`](Self::load_from_session) is called.
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            persistence: HistoryPersistence::new(store),
            catalog: Catalog::default(),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Create a session using the storage key and locale from `config`
    pub fn with_config(client: C, store: S, config: &ClientConfig) -> Self {
        Self {
            client,
            persistence: HistoryPersistence::with_key(store, config.storage_key.clone()),
            catalog: Catalog::new(config.locale),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace in-memory history with whatever is persisted
    pub fn load_from_session(&self) {
        let history = self.persistence.load();
        log::info!("Restored {} analyses from session", history.len());
        self.lock_state().history = history;
    }

    /// Drop all history, in memory and persisted, and clear the last error
    pub fn clear_history(&self) {
        {
            let mut state = self.lock_state();
            state.history.clear();
            state.last_error = None;
        }
        self.persistence.clear();
    }

    /// Submit content for classification and reconcile session state.
    ///
    /// Never fails: every outcome ends as a state mutation and is also
    /// returned for convenience.
    pub async fn analyze_content(&self, submission: Submission) -> AnalysisOutcome {
        let Some(_busy) = self.begin() else {
            log::warn!("Rejected {}: another analysis is in progress", submission.describe());
            return AnalysisOutcome::Rejected;
        };

        log::info!("Submitting {}", submission.describe());

        match self.client.submit(&submission).await {
            Ok(payload) => {
                let result = payload.stamp(Utc::now());
                let history = {
                    let mut state = self.lock_state();
                    state.history.insert(0, result.clone());
                    state.history.clone()
                };
                self.persistence.save(&history);

                log::info!(
                    "Classified as {} (confidence {:.2})",
                    result.category,
                    result.confidence_score
                );
                AnalysisOutcome::Completed(result)
            }
            Err(error) => {
                let (kind, message) = self.describe_failure(&error);
                log::error!("Analysis failed ({:?}): {}", kind, error);

                self.lock_state().last_error = Some(message.clone());
                AnalysisOutcome::Failed { kind, message }
            }
        }
    }

    /// Mark the session busy and clear the last error, unless already busy
    fn begin(&self) -> Option<BusyGuard<'_>> {
        let mut state = self.lock_state();
        if state.is_busy {
            return None;
        }
        state.is_busy = true;
        state.last_error = None;
        Some(BusyGuard { state: &self.state })
    }

    fn describe_failure(&self, error: &SubmissionError) -> (FailureKind, String) {
        match error {
            SubmissionError::Server {
                error_code,
                message,
                ..
            } => {
                let kind = match error_code.as_deref().and_then(ErrorCode::from_code) {
                    Some(code) if code.is_validation() => FailureKind::Validation,
                    _ => FailureKind::Service,
                };
                let message = self
                    .catalog
                    .resolve(error_code.as_deref(), message.as_deref());
                (kind, message)
            }
            SubmissionError::NoResponse { .. } => (
                FailureKind::Connectivity,
                self.catalog.connectivity_message().to_string(),
            ),
            SubmissionError::Unexpected { .. } => (
                FailureKind::Unexpected,
                self.catalog.unexpected_message().to_string(),
            ),
        }
    }

    /// Whether the classification service answers its health check
    pub async fn service_available(&self) -> bool {
        match self.client.health().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Classification service unavailable: {}", e);
                false
            }
        }
    }

    pub fn history(&self) -> Vec<ClassificationResult> {
        self.lock_state().history.clone()
    }

    pub fn latest(&self) -> Option<ClassificationResult> {
        self.lock_state().history.first().cloned()
    }

    pub fn is_busy(&self) -> bool {
        self.lock_state().is_busy
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock_state().last_error.clone()
    }

    /// Copy of the full state for rendering
    pub fn snapshot(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
