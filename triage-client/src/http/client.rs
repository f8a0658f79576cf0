use crate::config::ClientConfig;
use crate::error::{Result, SubmissionError};
use crate::http::request_builder::RequestBuilderImpl;
use crate::http::response_converter::{classify_transport_error, ResponseConverterImpl};
use crate::traits::ClassificationClient;
use crate::types::{ClassificationPayload, Submission};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

/// reqwest-backed classification client
#[derive(Clone)]
pub struct HttpClassificationClient {
    client: Client,
    request_builder: RequestBuilderImpl,
    response_converter: ResponseConverterImpl,
}

impl HttpClassificationClient {
    /// Create a new client; the configured timeout bounds every request
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout()).build()?;
        let request_builder = RequestBuilderImpl::new(client.clone(), config);

        Ok(Self {
            client,
            request_builder,
            response_converter: ResponseConverterImpl::new(),
        })
    }
}

impl ClassificationClient for HttpClassificationClient {
    async fn submit(
        &self,
        submission: &Submission,
    ) -> std::result::Result<ClassificationPayload, SubmissionError> {
        let request = self.request_builder.build_request(submission)?;
        log::debug!("POST {} with {}", request.url(), submission.describe());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(classify_transport_error)?;

        self.response_converter.convert_response(response).await
    }

    async fn health(&self) -> std::result::Result<(), SubmissionError> {
        let request = self.request_builder.build_health_request()?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport_error)?;
        if !(200..300).contains(&status) {
            return Err(SubmissionError::Server {
                status,
                error_code: None,
                message: None,
            });
        }

        match serde_json::from_str::<HealthBody>(&body) {
            Ok(health) if health.status == "healthy" => Ok(()),
            Ok(health) => Err(SubmissionError::unexpected(format!(
                "Service reported status '{}'",
                health.status
            ))),
            Err(e) => Err(SubmissionError::unexpected(format!(
                "Malformed health response: {}",
                e
            ))),
        }
    }
}
