use crate::config::ClientConfig;
use crate::error::SubmissionError;
use crate::types::Submission;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};

/// Builds multipart submission requests
#[derive(Clone)]
pub struct RequestBuilderImpl {
    client: Client,
    config: ClientConfig,
}

impl RequestBuilderImpl {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Multipart body with exactly one field: `file` or `text`
    pub fn build_form(submission: &Submission) -> Result<Form, SubmissionError> {
        let field = submission.kind().field_name();
        let form = match submission {
            Submission::File {
                filename,
                bytes,
                mime_type,
            } => {
                let mut part = Part::bytes(bytes.clone()).file_name(filename.clone());
                if let Some(mime) = mime_type {
                    part = part.mime_str(mime).map_err(|e| {
                        SubmissionError::unexpected(format!("Invalid MIME type '{}': {}", mime, e))
                    })?;
                }
                Form::new().part(field, part)
            }
            Submission::Text(text) => Form::new().text(field, text.clone()),
        };
        Ok(form)
    }

    /// `POST {base_url}/api/v1/process` carrying the submission
    pub fn build_request(&self, submission: &Submission) -> Result<Request, SubmissionError> {
        let url = self
            .config
            .process_url()
            .map_err(|e| SubmissionError::unexpected(format!("Invalid endpoint: {}", e)))?;
        let form = Self::build_form(submission)?;

        self.client
            .post(url)
            .multipart(form)
            .build()
            .map_err(|e| SubmissionError::unexpected(format!("Failed to build request: {}", e)))
    }

    /// `GET {base_url}/health`
    pub fn build_health_request(&self) -> Result<Request, SubmissionError> {
        let url = self
            .config
            .health_url()
            .map_err(|e| SubmissionError::unexpected(format!("Invalid endpoint: {}", e)))?;

        self.client
            .get(url)
            .build()
            .map_err(|e| SubmissionError::unexpected(format!("Failed to build request: {}", e)))
    }
}
