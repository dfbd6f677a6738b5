//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::traits::storage::{ByteStream, StorageProvider};

/// Stores each object as a plain file under a root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root_path`, creating the directory.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Map a storage key to a path inside the root.
    ///
    /// Keys are relative; any `..`, root or prefix component is rejected.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if key.is_empty() || escapes {
            return Err(AppError::storage(format!("Invalid storage key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

fn open_error(key: &str, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Stored object not found: {key}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to read: {key}"), e)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read(&self, path: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| open_error(path, e))?;
        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(Bytes::from))))
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write: {path}"), e)
        })?;

        debug!(path, bytes = data.len(), "Stored object");
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted stored object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete: {path}"),
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    async fn read_all(provider: &LocalStorageProvider, path: &str) -> AppResult<Vec<u8>> {
        let mut stream = provider.read(path).await?;
        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        Ok(collected)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, provider) = provider().await;

        provider
            .write("7/abc.bin", Bytes::from("hello world"))
            .await
            .unwrap();
        assert_eq!(read_all(&provider, "7/abc.bin").await.unwrap(), b"hello world");

        provider.delete("7/abc.bin").await.unwrap();
        let err = read_all(&provider, "7/abc.bin").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_stream_read() {
        let (_dir, provider) = provider().await;
        provider.write("s.txt", Bytes::from("streamed")).await.unwrap();

        assert_eq!(read_all(&provider, "s.txt").await.unwrap(), b"streamed");
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let (_dir, provider) = provider().await;
        provider.delete("never/written").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_read_is_not_found() {
        let (_dir, provider) = provider().await;
        let err = read_all(&provider, "nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let (_dir, provider) = provider().await;
        let err = provider
            .write("../escape.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(read_all(&provider, "a/../../etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn test_health_check() {
        let (dir, provider) = provider().await;
        assert!(provider.health_check().await.unwrap());
        assert_eq!(provider.provider_type(), "local");

        std::fs::remove_dir_all(dir.path()).unwrap();
        assert!(!provider.health_check().await.unwrap());
    }
}
