//! File operations with owner-or-admin enforcement.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::traits::storage::{ByteStream, StorageProvider};
use filedesk_database::store::FileRecordStore;
use filedesk_entity::file::{FileRecord, NewFileRecord};

use crate::bounded::bounded;
use crate::context::Principal;

const FALLBACK_FILE_NAME: &str = "upload";
const FALLBACK_MIME: &str = "application/octet-stream";

/// An uploaded file part. Carries no owner; the owner is always the
/// principal performing the upload.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

/// Reachability of the byte store, as reported by the health route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStatus {
    pub provider: String,
    pub available: bool,
}

/// Handles file records and their stored bytes.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileRecordStore>,
    storage: Arc<dyn StorageProvider>,
    call_timeout: Duration,
}

impl FileService {
    pub fn new(
        files: Arc<dyn FileRecordStore>,
        storage: Arc<dyn StorageProvider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            files,
            storage,
            call_timeout,
        }
    }

    /// Ask the storage provider whether it can serve requests. A failing
    /// check counts as unavailable.
    pub async fn storage_status(&self) -> StorageStatus {
        let available = match bounded(
            self.call_timeout,
            "storage health check",
            self.storage.health_check(),
        )
        .await
        {
            Ok(available) => available,
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                false
            }
        };
        StorageStatus {
            provider: self.storage.provider_type().to_string(),
            available,
        }
    }

    /// The principal's own files, newest first.
    pub async fn list(&self, principal: &Principal) -> AppResult<Vec<FileRecord>> {
        bounded(
            self.call_timeout,
            "list files",
            self.files.list_by_owner(&principal.user_id),
        )
        .await
    }

    /// Store the bytes, then record the metadata owned by `principal`.
    pub async fn upload(&self, principal: &Principal, upload: Upload) -> AppResult<FileRecord> {
        let id = Uuid::new_v4();
        let storage_path = format!("{}/{}", principal.user_id, id);
        let file_name = sanitize_file_name(&upload.file_name);
        let mime_type = upload
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        let size_bytes = upload.data.len() as i64;

        bounded(
            self.call_timeout,
            "store file bytes",
            self.storage.write(&storage_path, upload.data),
        )
        .await?;

        let record = NewFileRecord {
            id,
            user_id: principal.user_id.clone(),
            file_name,
            storage_path: storage_path.clone(),
            size_bytes,
            mime_type,
        };

        match bounded(self.call_timeout, "insert file record", self.files.insert(record)).await {
            Ok(record) => {
                info!(
                    file_id = %record.id,
                    user_id = %record.user_id,
                    size_bytes = record.size_bytes,
                    "File uploaded"
                );
                Ok(record)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned bytes");
                }
                Err(e)
            }
        }
    }

    /// Look up a file the principal may act on.
    ///
    /// Existence is checked before ownership.
    pub async fn find_accessible(&self, principal: &Principal, id: Uuid) -> AppResult<FileRecord> {
        let record = bounded(self.call_timeout, "find file", self.files.find_by_id(id))
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if !principal.can_access(&record.user_id) {
            info!(file_id = %id, user_id = %principal.user_id, "File access denied");
            return Err(AppError::forbidden("Forbidden"));
        }
        Ok(record)
    }

    /// Record plus a stream of its bytes.
    pub async fn download(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> AppResult<(FileRecord, ByteStream)> {
        let record = self.find_accessible(principal, id).await?;
        let stream = bounded(
            self.call_timeout,
            "open stored file",
            self.storage.read(&record.storage_path),
        )
        .await
        .map_err(|e| {
            if e.kind == filedesk_core::ErrorKind::NotFound {
                AppError::storage(format!("Bytes missing for file {id}"))
            } else {
                e
            }
        })?;
        Ok((record, stream))
    }

    /// Remove the record, then the bytes. A byte deletion failure is
    /// logged and does not fail the call.
    pub async fn delete(&self, principal: &Principal, id: Uuid) -> AppResult<()> {
        let record = self.find_accessible(principal, id).await?;

        let removed = bounded(self.call_timeout, "delete file record", self.files.delete_by_id(id))
            .await?;
        if !removed {
            return Err(AppError::not_found("File not found"));
        }

        if let Err(e) = bounded(
            self.call_timeout,
            "delete stored bytes",
            self.storage.delete(&record.storage_path),
        )
        .await
        {
            warn!(file_id = %id, error = %e, "File record removed but bytes remain");
        }

        info!(file_id = %id, user_id = %principal.user_id, "File deleted");
        Ok(())
    }
}

/// Keep only the final path segment of a client-supplied name.
fn sanitize_file_name(raw: &str) -> String {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_FILE_NAME.to_string()
    } else {
        name.to_string()
    }
}
