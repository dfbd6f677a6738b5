//! Time bound for store and storage calls.

use std::future::Future;
use std::time::Duration;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;

/// Await `fut`, failing with `ErrorKind::Timeout` once `limit` elapses.
pub async fn bounded<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(format!(
            "{operation} did not complete within {}ms",
            limit.as_millis()
        ))),
    }
}
