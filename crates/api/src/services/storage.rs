//! Attachment blob storage.
//!
//! Attachment metadata lives in the helpdesk database; the bytes themselves
//! go through the [`BlobStorage`] trait so the backend can be swapped between
//! an in-memory map (tests, local development) and a directory on disk.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::RwLock;

use crate::config::StorageConfig;

/// Error type for blob storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Abstraction over the attachment blob backend.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Generates an opaque storage key for a new attachment.
pub fn generate_blob_key() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();
    format!("att_{}", suffix)
}

/// Builds the configured storage backend.
pub fn build_storage(config: &StorageConfig) -> Result<Arc<dyn BlobStorage>, StorageError> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(InMemoryBlobStorage::new())),
        "fs" => {
            if config.root.is_empty() {
                return Err(StorageError::Backend(
                    "Filesystem storage requires storage.root".to_string(),
                ));
            }
            Ok(Arc::new(FsBlobStorage::new(PathBuf::from(&config.root))))
        }
        other => Err(StorageError::Backend(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}

/// In-memory blob storage.
#[derive(Default)]
pub struct InMemoryBlobStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        // Deleting an absent key is a no-op so that a retried delete of a
        // half-removed attachment still succeeds.
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

/// Blob storage backed by a flat directory on disk.
pub struct FsBlobStorage {
    root: PathBuf,
}

impl FsBlobStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys are generated by us, but reject anything that could escape
        // the storage root.
        if key.is_empty() || key.contains('/') || key.contains("..") {
            return Err(StorageError::Backend(format!("Invalid blob key: {}", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStorage for FsBlobStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_put_get_roundtrip() {
        let storage = InMemoryBlobStorage::new();
        storage.put("k1", vec![1, 2, 3]).await.unwrap();
        assert_eq!(storage.get("k1").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_memory_get_missing() {
        let storage = InMemoryBlobStorage::new();
        assert!(matches!(
            storage.get("nope").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_delete_is_idempotent() {
        let storage = InMemoryBlobStorage::new();
        storage.put("k1", vec![0]).await.unwrap();
        storage.delete("k1").await.unwrap();
        storage.delete("k1").await.unwrap();
        assert!(storage.get("k1").await.is_err());
    }

    #[test]
    fn test_generate_blob_key_shape() {
        let key = generate_blob_key();
        assert!(key.starts_with("att_"));
        assert_eq!(key.len(), 28);
        assert!(key.chars().skip(4).all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_blob_key_unique() {
        assert_ne!(generate_blob_key(), generate_blob_key());
    }

    #[test]
    fn test_fs_path_rejects_traversal() {
        let storage = FsBlobStorage::new(PathBuf::from("/tmp/blobs"));
        assert!(storage.path_for("../etc/passwd").is_err());
        assert!(storage.path_for("a/b").is_err());
        assert!(storage.path_for("").is_err());
        assert!(storage.path_for("att_abc123").is_ok());
    }

    #[test]
    fn test_build_storage_memory() {
        let config = StorageConfig {
            backend: "memory".to_string(),
            root: String::new(),
        };
        assert!(build_storage(&config).is_ok());
    }

    #[test]
    fn test_build_storage_unknown_backend() {
        let config = StorageConfig {
            backend: "s3".to_string(),
            root: String::new(),
        };
        assert!(build_storage(&config).is_err());
    }

    #[test]
    fn test_build_storage_fs_requires_root() {
        let config = StorageConfig {
            backend: "fs".to_string(),
            root: String::new(),
        };
        assert!(build_storage(&config).is_err());
    }
}
