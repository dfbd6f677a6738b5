//! Whole-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use filedesk_core::error::AppError;

use crate::error::ApiError;

/// Fails a request that runs past `limit` with the generic 500 body.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(method = %method, path = %path, limit_ms = limit.as_millis() as u64, "Request timed out");
            ApiError(AppError::timeout("Request timed out")).into_response()
        }
    }
}
