//! Path parameter parsing helpers.

use uuid::Uuid;

use filedesk_core::error::AppError;

/// Message for a malformed account id.
pub const INVALID_USER_ID: &str = "Invalid user ID. ID must be a positive number";

/// Parse an account id segment. Only plain positive decimal integers are
/// accepted; the normalized form is returned.
pub fn parse_user_id(s: &str) -> Result<String, AppError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(INVALID_USER_ID));
    }
    match s.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n.to_string()),
        _ => Err(AppError::validation(INVALID_USER_ID)),
    }
}

/// Parse a file id segment. Anything that is not a UUID cannot name a
/// stored file, so it reports as not found.
pub fn parse_file_id(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found("File not found"))
}
