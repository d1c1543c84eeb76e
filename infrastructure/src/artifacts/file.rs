//! Filesystem artifact store
//!
//! Every write creates a brand-new file under the store root; existing
//! files are never opened for writing, so an artifact cannot change after
//! its handle has been issued.

use async_trait::async_trait;
use simulacra_application::{ArtifactStore, StoreError};
use simulacra_domain::ArtifactHandle;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub struct FileArtifactStore {
    root: PathBuf,
    next_id: AtomicU64,
}

impl FileArtifactStore {
    /// Open (and create if needed) a store rooted at `root`
    pub async fn create(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        debug!("Artifact directory: {}", root.display());
        Ok(Self {
            root,
            next_id: AtomicU64::new(0),
        })
    }

    /// Create a fresh `run-<timestamp>` directory below `base`
    pub async fn for_run(base: impl AsRef<Path>) -> Result<Self, StoreError> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        Self::create(base.as_ref().join(format!("run-{}", stamp))).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, handle: &ArtifactHandle) -> Result<PathBuf, StoreError> {
        let name = handle.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(StoreError::InvalidHandle(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn write(&self, bytes: Vec<u8>) -> Result<ArtifactHandle, StoreError> {
        loop {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let name = format!("response-{:04}.txt", id);
            let path = self.root.join(&name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                // left over from an earlier store on the same directory
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            file.write_all(&bytes).await?;
            file.flush().await?;
            debug!(bytes = bytes.len(), "Wrote {}", path.display());
            return Ok(ArtifactHandle::new(name));
        }
    }

    async fn read(&self, handle: &ArtifactHandle) -> Result<Vec<u8>, StoreError> {
        let path = self.resolve(handle)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(handle.clone())),
            Err(e) => Err(e.into()),
        }
    }
}
