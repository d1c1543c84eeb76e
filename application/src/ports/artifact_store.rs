//! Artifact storage port
//!
//! Generated answers are written once by their branch and then read by the
//! branch's two scorers. Large payloads never travel through the fan-in.

use async_trait::async_trait;
use simulacra_domain::ArtifactHandle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Artifact not found: {0}")]
    NotFound(ArtifactHandle),

    #[error("Invalid artifact handle: {0}")]
    InvalidHandle(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Write-once byte storage addressed by opaque handles.
///
/// Every successful `write` returns a fresh handle; no two writes ever share
/// one, so concurrent branches cannot clobber each other's artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn write(&self, bytes: Vec<u8>) -> Result<ArtifactHandle, StoreError>;

    async fn read(&self, handle: &ArtifactHandle) -> Result<Vec<u8>, StoreError>;
}
