//! PostgreSQL file record repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_entity::file::{FileRecord, NewFileRecord};

use crate::store::FileRecordStore;

/// Repository for file metadata rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for FileRepository {
    async fn insert(&self, record: NewFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (id, user_id, file_name, storage_path, size_bytes, mime_type) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(record.id)
        .bind(&record.user_id)
        .bind(&record.file_name)
        .bind(&record.storage_path)
        .bind(record.size_bytes)
        .bind(&record.mime_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file record", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list_by_owner(&self, user_id: &str) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_owner(&self, user_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete files by owner", e)
            })?;
        Ok(result.rows_affected())
    }
}
