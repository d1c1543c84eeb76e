//! Word occurrence scorer
//!
//! Reads a stored answer and counts whole-word matches of one target word.

use crate::ports::artifact_store::{ArtifactStore, StoreError};
use simulacra_domain::{ArtifactHandle, count_word_occurrences};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactReadFailure {
    #[error("cannot read artifact {handle}: {source}")]
    Unreadable {
        handle: ArtifactHandle,
        #[source]
        source: StoreError,
    },

    #[error("artifact {0} is not valid UTF-8")]
    NotUtf8(ArtifactHandle),

    #[error("target word is empty")]
    EmptyWord,
}

/// Scores one artifact for one word. Read-only, so any number of scorers may
/// run against the same artifact at once.
pub struct WordOccurrenceScorer<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for WordOccurrenceScorer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ArtifactStore + ?Sized> WordOccurrenceScorer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn count_occurrences(
        &self,
        artifact: &ArtifactHandle,
        word: &str,
    ) -> Result<u64, ArtifactReadFailure> {
        if word.is_empty() {
            return Err(ArtifactReadFailure::EmptyWord);
        }

        let bytes =
            self.store
                .read(artifact)
                .await
                .map_err(|source| ArtifactReadFailure::Unreadable {
                    handle: artifact.clone(),
                    source,
                })?;
        let text =
            String::from_utf8(bytes).map_err(|_| ArtifactReadFailure::NotUtf8(artifact.clone()))?;

        Ok(count_word_occurrences(&text, word))
    }
}
