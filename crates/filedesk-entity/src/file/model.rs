//! File record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for one uploaded file.
///
/// `user_id` is the owning account's external id, copied from the
/// authenticated principal at upload time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: Uuid,
    /// Owning account's external id.
    pub user_id: String,
    /// Original filename as uploaded.
    pub file_name: String,
    /// Provider-relative storage key.
    #[serde(skip_serializing)]
    pub storage_path: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// Upload timestamp.
    pub uploaded_at: DateTime<Utc>,
}

/// Data required to persist a file record after its bytes are stored.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub storage_path: String,
    pub size_bytes: i64,
    pub mime_type: String,
}

impl NewFileRecord {
    /// Materialize the row the store will hold.
    pub fn into_record(self) -> FileRecord {
        FileRecord {
            id: self.id,
            user_id: self.user_id,
            file_name: self.file_name,
            storage_path: self.storage_path,
            size_bytes: self.size_bytes,
            mime_type: self.mime_type,
            uploaded_at: Utc::now(),
        }
    }
}
