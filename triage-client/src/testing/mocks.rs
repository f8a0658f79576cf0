use crate::error::{StorageError, SubmissionError};
use crate::traits::{ClassificationClient, SessionStore};
use crate::types::{ClassificationPayload, ClassificationResult, ServiceErrorEnvelope, Submission};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

type Reply = Result<ClassificationPayload, SubmissionError>;

/// Mock classification client replaying queued replies in order
#[derive(Clone, Default)]
pub struct MockClassificationClient {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
    gate: Option<Arc<Notify>>,
    healthy: bool,
}

impl MockClassificationClient {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Self::default()
        }
    }

    pub fn with_success(self, payload: ClassificationPayload) -> Self {
        self.push(Ok(payload));
        self
    }

    pub fn with_failure(self, error: SubmissionError) -> Self {
        self.push(Err(error));
        self
    }

    /// Hold every submission until the gate is notified
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Submissions received so far
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

impl ClassificationClient for MockClassificationClient {
    async fn submit(&self, submission: &Submission) -> Reply {
        self.submissions.lock().unwrap().push(submission.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Err(SubmissionError::unexpected("Mock reply not queued")))
    }

    async fn health(&self) -> Result<(), SubmissionError> {
        if self.healthy {
            Ok(())
        } else {
            Err(SubmissionError::NoResponse {
                reason: "mock service down".to_string(),
                timed_out: false,
            })
        }
    }
}

/// Store whose every operation fails, or only writes when `reads_ok` is set
#[derive(Clone, Default)]
pub struct FailingStore {
    pub reads_ok: bool,
}

impl SessionStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.reads_ok {
            Ok(None)
        } else {
            Err(StorageError::Unavailable("mock read failure".to_string()))
        }
    }

    fn set(&self, _key: &str, value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded {
            required: value.len(),
            quota: 0,
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("mock remove failure".to_string()))
    }
}

/// Helper functions for creating test data
pub mod test_helpers {
    use super::*;
    use crate::types::{Category, NlpDebug};
    use chrono::{TimeZone, Utc};

    pub fn create_payload(summary: &str) -> ClassificationPayload {
        ClassificationPayload {
            filename: None,
            category: Category::Productive,
            confidence_score: 0.9,
            summary: summary.to_string(),
            reason: None,
            suggested_response: Some(format!("Resposta para {}", summary)),
            nlp_debug: Some(NlpDebug {
                detected_keywords: "suporte status".to_string(),
                keyword_analysis: None,
            }),
            processing_details: None,
        }
    }

    /// History entry stamped `minute` minutes after a fixed instant
    pub fn create_result(summary: &str, minute: u32) -> ClassificationResult {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        create_payload(summary).stamp(base + chrono::Duration::minutes(minute as i64))
    }

    pub fn server_error(status: u16, code: &str, message: &str) -> SubmissionError {
        SubmissionError::from_envelope(
            status,
            ServiceErrorEnvelope {
                status: "error".to_string(),
                error_code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        )
    }
}
