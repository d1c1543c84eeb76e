//! Generation worker
//!
//! Calls the text generator once and stores the answer as an artifact.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use crate::ports::text_generator::{GeneratorError, TextGenerator};
use simulacra_domain::{ArtifactHandle, SamplingConfig};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while producing a branch's answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationFailure {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("generation call failed: {0}")]
    Remote(#[from] GeneratorError),

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("could not store generated text: {0}")]
    ArtifactWrite(StoreError),
}

impl GenerationFailure {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationFailure::Remote(_)
                | GenerationFailure::Timeout(_)
                | GenerationFailure::EmptyContent
        )
    }
}

/// Wraps one generation call: prompt in, artifact handle out.
///
/// Makes exactly one remote call per `generate` and never retries. On
/// success the text is stored verbatim (exactly one artifact write); on
/// failure nothing is written.
pub struct GenerationWorker<G: ?Sized, S: ?Sized> {
    generator: Arc<G>,
    store: Arc<S>,
    timeout: Option<Duration>,
    allow_empty: bool,
}

impl<G: ?Sized, S: ?Sized> Clone for GenerationWorker<G, S> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
            store: Arc::clone(&self.store),
            timeout: self.timeout,
            allow_empty: self.allow_empty,
        }
    }
}

impl<G, S> GenerationWorker<G, S>
where
    G: TextGenerator + ?Sized,
    S: ArtifactStore + ?Sized,
{
    pub fn new(generator: Arc<G>, store: Arc<S>) -> Self {
        Self {
            generator,
            store,
            timeout: None,
            allow_empty: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_empty_content_allowed(mut self, allowed: bool) -> Self {
        self.allow_empty = allowed;
        self
    }

    pub async fn generate(
        &self,
        prompt: &str,
        config: &SamplingConfig,
    ) -> Result<ArtifactHandle, GenerationFailure> {
        if prompt.is_empty() {
            return Err(GenerationFailure::EmptyPrompt);
        }

        let call = self.generator.generate(prompt, config);
        let text = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| GenerationFailure::Timeout(limit))??,
            None => call.await?,
        };

        if text.is_empty() && !self.allow_empty {
            return Err(GenerationFailure::EmptyContent);
        }

        let bytes = text.len();
        let handle = self
            .store
            .write(text.into_bytes())
            .await
            .map_err(GenerationFailure::ArtifactWrite)?;

        debug!(artifact = %handle, bytes, "Stored generated text");
        Ok(handle)
    }
}
