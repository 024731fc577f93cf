use crate::keys;
use crate::traits::{ScratchStorage, StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Local filesystem scratch storage
#[derive(Clone)]
pub struct LocalScratchStorage {
    base_path: PathBuf,
}

impl LocalScratchStorage {
    /// Create a new LocalScratchStorage instance rooted at `base_path`
    /// (e.g. `/tmp/meetnote`). The directory is created if missing.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create scratch directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalScratchStorage { base_path })
    }

    /// Convert storage key to filesystem path with traversal validation.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        self.ensure_parent_dir(path).await?;

        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl ScratchStorage for LocalScratchStorage {
    async fn store_media(
        &self,
        session_id: Uuid,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let key = keys::media_key(session_id, filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        let start = std::time::Instant::now();
        self.write_file(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Scratch media write successful"
        );

        Ok(key)
    }

    async fn store_at(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;
        let size = data.len();

        let start = std::time::Instant::now();
        self.write_file(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Scratch write successful"
        );

        Ok(())
    }

    async fn retrieve(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(data)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(key = %storage_key, "Scratch delete successful");

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn delete_session(&self, session_id: Uuid) -> StorageResult<()> {
        for prefix in keys::session_prefixes(session_id) {
            let path = self.key_to_path(&prefix)?;
            if fs::try_exists(&path).await.unwrap_or(false) {
                fs::remove_dir_all(&path).await.map_err(|e| {
                    StorageError::DeleteFailed(format!(
                        "Failed to delete session directory {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            }
        }

        tracing::info!(session_id = %session_id, "Session scratch files removed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_and_retrieve_media() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        let session_id = Uuid::new_v4();
        let data = b"meeting audio bytes".to_vec();

        let key = storage
            .store_media(session_id, "standup.mp3", data.clone())
            .await
            .unwrap();

        assert!(key.starts_with(&format!("media/{}/", session_id)));
        assert_eq!(storage.retrieve(&key).await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        let result = storage.retrieve("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.store_at("../escape.docx", b"x".to_vec()).await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_store_at_overwrites() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        let key = keys::document_key(Uuid::new_v4(), "meeting_minutes.docx");
        storage.store_at(&key, b"first".to_vec()).await.unwrap();
        storage.store_at(&key, b"second".to_vec()).await.unwrap();

        assert_eq!(storage.retrieve(&key).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        assert!(storage.delete("media/nope/missing.mp3").await.is_ok());
    }

    #[tokio::test]
    async fn test_retrieve_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        let result = storage.retrieve("media/nope/missing.mp3").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_session_removes_all_files() {
        let dir = tempdir().unwrap();
        let storage = LocalScratchStorage::new(dir.path()).await.unwrap();

        let session_id = Uuid::new_v4();
        let media_key = storage
            .store_media(session_id, "call.wav", b"audio".to_vec())
            .await
            .unwrap();
        let doc_key = keys::document_key(session_id, "meeting_summary.docx");
        storage.store_at(&doc_key, b"doc".to_vec()).await.unwrap();

        storage.delete_session(session_id).await.unwrap();

        assert!(!storage.exists(&media_key).await.unwrap());
        assert!(!storage.exists(&doc_key).await.unwrap());
    }
}
