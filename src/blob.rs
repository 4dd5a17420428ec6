//! The object-store capability consumed by the blob-backed status store: a
//! container of blobs addressed by hierarchical string keys.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use {async_trait::async_trait, bytes::Bytes, object_store::path::Path};

use crate::Result;

/// A blob container: put/get by key, existence check, create-if-absent.
///
/// Absence on download is discriminated from faults (`Ok(None)`), so a
/// missing blob never has to be fished out of an error value.
#[async_trait]
pub trait BlobContainer: Send + Sync {
    /// Create the backing container when it does not exist yet.
    async fn ensure(&self) -> Result<()>;

    /// Fetch the blob at `key`. `Ok(None)` when no blob exists there.
    async fn download(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `body` at `key`, overwriting any prior blob.
    async fn upload(&self, key: &str, body: Bytes) -> Result<()>;

    /// Whether a blob exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.download(key).await?.is_some())
    }
}

/// In-process container backed by `HashMap`. No persistence — for tests and
/// ephemeral hosts.
#[derive(Default)]
pub struct MemoryContainer {
    created: Mutex<bool>,
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`BlobContainer::ensure`] has run.
    pub fn is_created(&self) -> bool {
        *self.created.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BlobContainer for MemoryContainer {
    async fn ensure(&self) -> Result<()> {
        *self.created.lock().unwrap_or_else(|e| e.into_inner()) = true;
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Option<Bytes>> {
        let blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        Ok(blobs.get(key).cloned())
    }

    async fn upload(&self, key: &str, body: Bytes) -> Result<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(|e| e.into_inner());
        blobs.insert(key.to_string(), body);
        Ok(())
    }
}

/// Adapter over the `object_store` crate for real remote backends (S3 and
/// compatible stores).
pub struct ObjectStoreContainer {
    store: Arc<dyn object_store::ObjectStore>,
}

impl ObjectStoreContainer {
    pub fn new(store: Arc<dyn object_store::ObjectStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BlobContainer for ObjectStoreContainer {
    async fn ensure(&self) -> Result<()> {
        // Buckets are provisioned out of band; object stores expose no
        // container-creation operation.
        Ok(())
    }

    async fn download(&self, key: &str) -> Result<Option<Bytes>> {
        let path = Path::from(key);
        match self.store.get(&path).await {
            Ok(result) => Ok(Some(result.bytes().await?)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn upload(&self, key: &str, body: Bytes) -> Result<()> {
        let path = Path::from(key);
        self.store.put(&path, body.into()).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self.store.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    #[tokio::test]
    async fn test_memory_container_roundtrip() {
        let container = MemoryContainer::new();
        container
            .upload("timers/h/s/status", Bytes::from_static(b"{}"))
            .await
            .unwrap();
        let body = container.download("timers/h/s/status").await.unwrap();
        assert_eq!(body, Some(Bytes::from_static(b"{}")));
    }

    #[tokio::test]
    async fn test_memory_container_absent() {
        let container = MemoryContainer::new();
        assert_eq!(container.download("nope").await.unwrap(), None);
        assert!(!container.exists("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_container_ensure_marks_created() {
        let container = MemoryContainer::new();
        assert!(!container.is_created());
        container.ensure().await.unwrap();
        assert!(container.is_created());
    }

    #[tokio::test]
    async fn test_object_store_container_roundtrip() {
        let container = ObjectStoreContainer::new(Arc::new(InMemory::new()));
        container.ensure().await.unwrap();
        container
            .upload("timers/h/s/status", Bytes::from_static(b"abc"))
            .await
            .unwrap();
        let body = container.download("timers/h/s/status").await.unwrap();
        assert_eq!(body, Some(Bytes::from_static(b"abc")));
        assert!(container.exists("timers/h/s/status").await.unwrap());
    }

    #[tokio::test]
    async fn test_object_store_container_not_found_is_absent() {
        let container = ObjectStoreContainer::new(Arc::new(InMemory::new()));
        assert_eq!(container.download("missing").await.unwrap(), None);
        assert!(!container.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_object_store_container_overwrites() {
        let container = ObjectStoreContainer::new(Arc::new(InMemory::new()));
        container
            .upload("k", Bytes::from_static(b"one"))
            .await
            .unwrap();
        container
            .upload("k", Bytes::from_static(b"two"))
            .await
            .unwrap();
        let body = container.download("k").await.unwrap();
        assert_eq!(body, Some(Bytes::from_static(b"two")));
    }
}
