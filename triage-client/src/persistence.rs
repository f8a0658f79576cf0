//! Session persistence for classification history.
//!
//! Every operation here is fail-soft: problems are logged and swallowed so
//! that storage never interferes with a submission.

use crate::traits::SessionStore;
use crate::types::ClassificationResult;

/// Default key holding the JSON-serialized history
pub const HISTORY_KEY: &str = "analysis_history";

/// Reads and writes history to a session store under a single key
#[derive(Debug, Clone)]
pub struct HistoryPersistence<S: SessionStore> {
    store: S,
    key: String,
}

impl<S: SessionStore> HistoryPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key<K: Into<String>>(store: S, key: K) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load persisted history, most recent first.
    ///
    /// Missing data yields an empty history. Data that is not a JSON array of
    /// valid results is removed from the store and also yields an empty history.
    pub fn load(&self) -> Vec<ClassificationResult> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Failed to read history from session storage: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ClassificationResult>>(&raw) {
            Ok(history) => {
                log::debug!("Loaded {} history entries from '{}'", history.len(), self.key);
                history
            }
            Err(e) => {
                log::error!("Discarding corrupt history under '{}': {}", self.key, e);
                if let Err(e) = self.store.remove(&self.key) {
                    log::warn!("Failed to remove corrupt history: {}", e);
                }
                Vec::new()
            }
        }
    }

    /// Persist history. On failure the previously stored value is left as is.
    pub fn save(&self, history: &[ClassificationResult]) {
        let serialized = match serde_json::to_string(history) {
            Ok(serialized) => serialized,
            Err(e) => {
                log::error!("Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &serialized) {
            log::error!("Failed to save history to session storage: {}", e);
        }
    }

    /// Remove persisted history
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            log::error!("Failed to clear history from session storage: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::mocks::{test_helpers, FailingStore};

    #[test]
    fn test_load_missing_is_empty() {
        let persistence = HistoryPersistence::new(MemoryStore::new());
        assert!(persistence.load().is_empty());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let store = MemoryStore::new();
        let persistence = HistoryPersistence::new(store.clone());
        let history = vec![
            test_helpers::create_result("b", 2),
            test_helpers::create_result("a", 1),
        ];

        persistence.save(&history);
        assert!(store.contains_key(HISTORY_KEY));
        assert_eq!(persistence.load(), history);
    }

    #[test]
    fn test_corrupt_json_is_discarded() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not valid json").unwrap();
        let persistence = HistoryPersistence::new(store.clone());

        assert!(persistence.load().is_empty());
        assert!(!store.contains_key(HISTORY_KEY));
    }

    #[test]
    fn test_schema_mismatch_is_discarded() {
        let cases = [
            r#"{"category": "Produtivo"}"#,
            r#"[{"category": "Produtivo", "confidence_score": 0.9, "summary": "x", "suggested_response": null}]"#,
            r#"[{"category": "Spam", "confidence_score": 0.9, "summary": "x", "suggested_response": null, "processedAt": "2024-01-01T00:00:00.000Z"}]"#,
            r#"[{"category": "Produtivo", "confidence_score": 0.9, "summary": "x", "suggested_response": null, "processedAt": "yesterday"}]"#,
        ];

        for raw in cases {
            let store = MemoryStore::new();
            store.set(HISTORY_KEY, raw).unwrap();
            let persistence = HistoryPersistence::new(store.clone());
            assert!(persistence.load().is_empty(), "accepted: {}", raw);
            assert!(!store.contains_key(HISTORY_KEY), "kept: {}", raw);
        }
    }

    #[test]
    fn test_save_failure_keeps_previous_value() {
        let store = MemoryStore::with_quota(4096);
        let persistence = HistoryPersistence::new(store.clone());
        let first = vec![test_helpers::create_result("a", 1)];
        persistence.save(&first);

        let huge: Vec<_> = (0..200)
            .map(|i| test_helpers::create_result(&"x".repeat(64), i))
            .collect();
        persistence.save(&huge);

        assert_eq!(persistence.load(), first);
    }

    #[test]
    fn test_failing_store_never_panics() {
        let persistence = HistoryPersistence::new(FailingStore::default());
        persistence.save(&[test_helpers::create_result("a", 1)]);
        assert!(persistence.load().is_empty());
        persistence.clear();
    }

    #[test]
    fn test_custom_key_and_clear() {
        let store = MemoryStore::new();
        let persistence = HistoryPersistence::with_key(store.clone(), "other_history");
        persistence.save(&[test_helpers::create_result("a", 1)]);
        assert!(store.contains_key("other_history"));
        assert!(!store.contains_key(HISTORY_KEY));

        persistence.clear();
        assert!(store.is_empty());
    }
}
