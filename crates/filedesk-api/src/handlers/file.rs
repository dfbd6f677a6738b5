//! File handlers: list, upload, download, delete.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tracing::debug;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_entity::file::FileRecord;
use filedesk_service::file::Upload;
use filedesk_storage::mime;

use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::AuthPrincipal;
use crate::extractors::path::parse_file_id;
use crate::state::FilesState;

/// Name of the multipart part carrying the file.
const FILE_FIELD: &str = "file";

/// GET /
pub async fn list_files(
    State(state): State<FilesState>,
    principal: AuthPrincipal,
) -> ApiResult<Json<Vec<FileRecord>>> {
    Ok(Json(state.files.list(&principal).await?))
}

/// POST /
///
/// Only the `file` part is read. Other parts, including any owner-like
/// field, are ignored: the owner is always the caller.
pub async fn upload_file(
    State(state): State<FilesState>,
    principal: AuthPrincipal,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<FileRecord>)> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Upload is not multipart");
        AppError::validation("No file uploaded")
    })?;

    let mut upload: Option<Upload> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) || upload.is_some() {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let declared = field.content_type().map(str::to_string);
        let data: Bytes = field.bytes().await.map_err(multipart_error)?;

        let mime_type = declared
            .filter(|m| !m.is_empty() && m != mime::DEFAULT_MIME)
            .unwrap_or_else(|| mime::guess_from_name(&file_name).to_string());

        upload = Some(Upload {
            file_name,
            mime_type: Some(mime_type),
            data,
        });
    }

    let upload = upload.ok_or_else(|| AppError::validation("No file uploaded"))?;
    let record = state.files.upload(&principal, upload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// A body over the upload limit keeps its 413; any other multipart failure
/// is a plain bad request.
fn multipart_error(e: MultipartError) -> AppError {
    debug!(reason = %e.body_text(), "Failed to read multipart body");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("File too large")
    } else {
        AppError::validation("Invalid request")
    }
}

/// GET /{id}/download
pub async fn download_file(
    State(state): State<FilesState>,
    principal: AuthPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_file_id(&id)?;
    let (record, stream) = state.files.download(&principal, id).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, record.mime_type.as_str())
        .header(header::CONTENT_DISPOSITION, content_disposition(&record.file_name))
        .header(header::CONTENT_LENGTH, record.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Response build failed", e))?;
    Ok(response)
}

/// DELETE /{id}
pub async fn delete_file(
    State(state): State<FilesState>,
    principal: AuthPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_file_id(&id)?;
    state.files.delete(&principal, id).await?;
    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// `attachment` disposition with a header-safe quoted file name.
fn content_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
