//! Vertex AI generator
//!
//! One HTTPS request per `generate` call, authenticated with an OAuth
//! bearer token. No retries happen here.

use super::types::{PredictRequest, error_message, parse_predict_response};
use async_trait::async_trait;
use simulacra_application::{GeneratorError, TextGenerator};
use simulacra_domain::{ConfigurationError, SamplingConfig};
use tracing::{debug, info};

pub struct VertexAiGenerator {
    client: reqwest::Client,
    project_id: String,
    access_token: String,
    /// Overrides `https://{location}-aiplatform.googleapis.com`
    endpoint: Option<String>,
}

impl VertexAiGenerator {
    /// Create a generator for a Google Cloud project.
    ///
    /// Both the project id and the access token must be non-blank.
    pub fn new(
        project_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let project_id = project_id.into();
        let access_token = access_token.into();

        if project_id.trim().is_empty() {
            return Err(ConfigurationError::MissingSetting(
                "vertex.project_id".to_string(),
            ));
        }
        if access_token.trim().is_empty() {
            return Err(ConfigurationError::MissingSetting(
                "Vertex AI access token".to_string(),
            ));
        }

        info!(project = %project_id, "Vertex AI generator initialized");

        Ok(Self {
            client: reqwest::Client::new(),
            project_id,
            access_token,
            endpoint: None,
        })
    }

    /// Send requests to a different base URL (regional proxy, local fake)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into().trim_end_matches('/').to_string());
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Full `:predict` URL for the configured model and location
    pub fn predict_url(&self, config: &SamplingConfig) -> String {
        let base = self.endpoint.clone().unwrap_or_else(|| {
            format!("https://{}-aiplatform.googleapis.com", config.location())
        });
        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            base,
            self.project_id,
            config.location(),
            config.model()
        )
    }
}

#[async_trait]
impl TextGenerator for VertexAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        config: &SamplingConfig,
    ) -> Result<String, GeneratorError> {
        let url = self.predict_url(config);
        debug!(model = config.model(), "POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&PredictRequest::new(prompt, config))
            .send()
            .await
            .map_err(|e| GeneratorError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(GeneratorError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_predict_response(&body)
    }
}
