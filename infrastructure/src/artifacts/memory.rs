//! In-memory artifact store

use async_trait::async_trait;
use simulacra_application::{ArtifactStore, StoreError};
use simulacra_domain::ArtifactHandle;
use std::collections::HashMap;
use std::sync::Mutex;

/// Artifacts kept in a `HashMap` for the life of the process.
///
/// Thread-safe via `Mutex`; the lock is never held across an await.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    artifacts: HashMap<ArtifactHandle, Vec<u8>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|inner| inner.artifacts.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn write(&self, bytes: Vec<u8>) -> Result<ArtifactHandle, StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Io("artifact store lock poisoned".to_string()))?;

        let handle = ArtifactHandle::new(format!("artifact-{}", inner.next_id));
        inner.next_id += 1;
        inner.artifacts.insert(handle.clone(), bytes);
        Ok(handle)
    }

    async fn read(&self, handle: &ArtifactHandle) -> Result<Vec<u8>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Io("artifact store lock poisoned".to_string()))?;

        inner
            .artifacts
            .get(handle)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(handle.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let store = InMemoryArtifactStore::new();
        let handle = store.write(b"tabs".to_vec()).await.unwrap();

        assert_eq!(store.read(&handle).await.unwrap(), b"tabs");
        // reads are repeatable: both scorers read the same artifact
        assert_eq!(store.read(&handle).await.unwrap(), b"tabs");
    }

    #[tokio::test]
    async fn test_every_write_gets_a_fresh_handle() {
        let store = InMemoryArtifactStore::new();
        let a = store.write(b"same".to_vec()).await.unwrap();
        let b = store.write(b"same".to_vec()).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_handle() {
        let store = InMemoryArtifactStore::new();
        let err = store
            .read(&ArtifactHandle::new("artifact-42"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.is_empty());
    }
}
