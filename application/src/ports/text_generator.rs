//! Text generation port
//!
//! Defines the interface for the remote text-completion service.

use async_trait::async_trait;
use simulacra_domain::SamplingConfig;
use thiserror::Error;

/// Errors that can occur while calling the generation service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Remote text-completion call.
///
/// Implementations issue exactly one request per call and return the full
/// generated text unmodified. They must not retry internally; retries are
/// decided by the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, config: &SamplingConfig)
    -> Result<String, GeneratorError>;
}
