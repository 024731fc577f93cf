//! Storage abstraction trait
//!
//! This module defines the ScratchStorage trait that storage backends
//! implement so the pipeline never couples to filesystem details.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Scratch storage abstraction.
///
/// **Key format:** keys are session-scoped, `media/{session_id}/{file}` for
/// uploads and `documents/{session_id}/{file}` for exports. See [`crate::keys`].
#[async_trait]
pub trait ScratchStorage: Send + Sync {
    /// Store an uploaded recording under a freshly generated key and return
    /// that key.
    async fn store_media(
        &self,
        session_id: Uuid,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Write data to a specific key, overwriting any prior file. Used for
    /// generated documents, which have fixed per-action names.
    async fn store_at(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file by its storage key.
    async fn retrieve(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing file is not an
    /// error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete everything a session owns (uploads and documents).
    async fn delete_session(&self, session_id: Uuid) -> StorageResult<()>;
}
