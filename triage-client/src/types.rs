use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Binary classification assigned by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Produtivo")]
    Productive,
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl Category {
    /// Wire representation used by the service
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productive => "Produtivo",
            Self::Unproductive => "Improdutivo",
        }
    }

}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword scoring produced by the service's NLP stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    pub produtivo_score: f64,
    pub improdutivo_score: f64,
    pub total_keywords: u32,
}

/// Diagnostic payload attached to a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NlpDebug {
    pub detected_keywords: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_analysis: Option<KeywordAnalysis>,
}

impl NlpDebug {
    /// Detected keywords split on whitespace
    pub fn keywords(&self) -> Vec<&str> {
        self.detected_keywords.split_whitespace().collect()
    }
}

/// How the service arrived at its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    KeywordsOnly,
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingDetails {
    pub classification_method: ClassificationMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_full_text: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_ai: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_fallback: Option<bool>,
    pub keyword_analysis: KeywordAnalysis,
}

/// Classification as returned by the service, before the client stamps it.
///
/// Any `processedAt` field present in the server payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPayload {
    #[serde(default)]
    pub filename: Option<String>,
    pub category: Category,
    /// Probability in [0, 1]
    pub confidence_score: f64,
    pub summary: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub suggested_response: Option<String>,
    #[serde(default)]
    pub nlp_debug: Option<NlpDebug>,
    #[serde(default)]
    pub processing_details: Option<ProcessingDetails>,
}

impl ClassificationPayload {
    /// Attach the local receipt timestamp, producing a history entry.
    ///
    /// The timestamp is cut to milliseconds, the precision it is stored with.
    pub fn stamp(self, processed_at: DateTime<Utc>) -> ClassificationResult {
        let processed_at = processed_at.trunc_subsecs(3);
        ClassificationResult {
            filename: self.filename,
            category: self.category,
            confidence_score: self.confidence_score,
            summary: self.summary,
            reason: self.reason,
            suggested_response: self.suggested_response,
            nlp_debug: self.nlp_debug,
            processing_details: self.processing_details,
            processed_at,
        }
    }
}

/// A classification held in session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub category: Category,
    /// Probability in [0, 1]
    pub confidence_score: f64,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub suggested_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlp_debug: Option<NlpDebug>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_details: Option<ProcessingDetails>,
    /// Client-side receipt time, never taken from the server
    #[serde(rename = "processedAt", with = "processed_at_format")]
    pub processed_at: DateTime<Utc>,
}

impl ClassificationResult {
    /// Confidence on a 0-100 scale for display
    pub fn confidence_percent(&self) -> f64 {
        self.confidence_score * 100.0
    }

    pub fn has_suggestion(&self) -> bool {
        self.suggested_response
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix
mod processed_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Success envelope: `{status, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    pub status: String,
    pub data: ClassificationPayload,
}

/// Error envelope: `{status, error_code, message, details?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceErrorEnvelope {
    pub status: String,
    pub error_code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Which multipart field a submission populates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    File,
    Text,
}

impl ContentKind {
    /// Multipart field name
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Text => "text",
        }
    }
}

/// Content submitted for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File {
        filename: String,
        bytes: Vec<u8>,
        mime_type: Option<String>,
    },
    Text(String),
}

impl Submission {
    pub fn file<S: Into<String>>(filename: S, bytes: Vec<u8>) -> Self {
        Self::File {
            filename: filename.into(),
            bytes,
            mime_type: None,
        }
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    /// Set the MIME type of a file part; no effect on text submissions
    pub fn with_mime_type<S: Into<String>>(mut self, mime: S) -> Self {
        if let Self::File { mime_type, .. } = &mut self {
            *mime_type = Some(mime.into());
        }
        self
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::File { .. } => ContentKind::File,
            Self::Text(_) => ContentKind::Text,
        }
    }

    /// Short description used in log lines
    pub fn describe(&self) -> String {
        match self {
            Self::File { filename, bytes, .. } => format!("file '{}' ({} bytes)", filename, bytes.len()),
            Self::Text(text) => format!("text ({} chars)", text.chars().count()),
        }
    }
}
