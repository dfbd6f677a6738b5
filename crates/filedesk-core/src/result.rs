//! Convenience result type alias for FileDesk.

use crate::error::AppError;

/// A specialized `Result` type for FileDesk operations.
pub type AppResult<T> = Result<T, AppError>;
