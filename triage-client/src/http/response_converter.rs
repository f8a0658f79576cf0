use crate::error::SubmissionError;
use crate::types::{ClassificationPayload, SuccessEnvelope};
use reqwest::Response;
use serde_json::Value;

/// Turns raw responses and transport failures into submission outcomes
#[derive(Clone)]
pub struct ResponseConverterImpl;

impl ResponseConverterImpl {
    pub fn new() -> Self {
        Self
    }

    /// Decode a response from the process endpoint
    pub async fn convert_response(
        &self,
        response: Response,
    ) -> Result<ClassificationPayload, SubmissionError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error);
        Self::convert_read(status, body)
    }

    /// Decode a status and the outcome of reading its body.
    ///
    /// An error status stays a server error even when its body could not be read.
    pub fn convert_read(
        status: u16,
        body: Result<String, SubmissionError>,
    ) -> Result<ClassificationPayload, SubmissionError> {
        match body {
            Ok(body) => Self::convert_body(status, &body),
            Err(error) if (200..300).contains(&status) => Err(error),
            Err(error) => {
                log::debug!("Could not read error body for status {}: {}", status, error);
                Err(SubmissionError::Server {
                    status,
                    error_code: None,
                    message: None,
                })
            }
        }
    }

    /// Decode a status and body pair
    pub fn convert_body(status: u16, body: &str) -> Result<ClassificationPayload, SubmissionError> {
        if (200..300).contains(&status) {
            return serde_json::from_str::<SuccessEnvelope>(body)
                .map(|envelope| envelope.data)
                .map_err(|e| {
                    SubmissionError::unexpected(format!("Malformed success response: {}", e))
                });
        }

        // Each field is read on its own so a malformed one does not hide the others
        let error_body = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);
        let field = |name: &str| {
            error_body
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Err(SubmissionError::Server {
            status,
            error_code: field("error_code"),
            message: field("message"),
        })
    }
}

impl Default for ResponseConverterImpl {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a reqwest failure onto the submission error variants
pub fn classify_transport_error(error: reqwest::Error) -> SubmissionError {
    if error.is_timeout() {
        SubmissionError::NoResponse {
            reason: format!("request timed out: {}", error),
            timed_out: true,
        }
    } else if error.is_connect() || error.is_request() {
        SubmissionError::NoResponse {
            reason: error.to_string(),
            timed_out: false,
        }
    } else {
        SubmissionError::unexpected(error.to_string())
    }
}
