//! Shared helpers for the triage-client integration tests

use serde_json::{json, Value};
use triage_client::{ClientConfig, HttpClassificationClient, MemoryStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub use triage_client::AnalysisSession;

pub type HttpSession = AnalysisSession<HttpClassificationClient, MemoryStore>;

pub const PROCESS_PATH: &str = "/api/v1/process";

/// Install a test logger once; repeated calls are ignored
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Success envelope as the service sends it
pub fn success_envelope(summary: &str, filename: Option<&str>) -> Value {
    json!({
        "status": "success",
        "data": {
            "filename": filename,
            "category": "Produtivo",
            "confidence_score": 0.9,
            "summary": summary,
            "reason": "Contém solicitação explícita",
            "suggested_response": "Obrigado pelo contato, retornaremos em breve.",
            "nlp_debug": {
                "detected_keywords": "solicitação status",
                "keyword_analysis": {
                    "matched_keywords": ["solicitação"],
                    "produtivo_score": 1,
                    "improdutivo_score": 0,
                    "total_keywords": 2
                }
            },
            "processing_details": {
                "classification_method": "keywords_only",
                "used_ai": false,
                "used_fallback": false,
                "keyword_analysis": {
                    "matched_keywords": ["solicitação"],
                    "produtivo_score": 1,
                    "improdutivo_score": 0,
                    "total_keywords": 2
                }
            }
        }
    })
}

/// Error envelope as the service sends it
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "error_code": code,
        "message": message,
        "details": {}
    })
}

/// Mount a single response on the process endpoint
pub async fn mount_process_response(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(PROCESS_PATH))
        .respond_with(template)
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer, timeout_seconds: u64) -> ClientConfig {
    ClientConfig::builder()
        .base_url(server.uri())
        .timeout(timeout_seconds)
        .build()
        .expect("mock server config is valid")
}

/// Session against `server` with a fresh in-memory store
pub fn session_for(server: &MockServer, timeout_seconds: u64) -> (HttpSession, MemoryStore) {
    let store = MemoryStore::new();
    let config = config_for(server, timeout_seconds);
    let session = triage_client::create_session(config, store.clone()).expect("session builds");
    (session, store)
}

/// Multipart bodies of every request the server received, as text
pub async fn received_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| String::from_utf8_lossy(&request.body).to_string())
        .collect()
}
