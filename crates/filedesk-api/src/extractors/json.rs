//! JSON body extractor with a fixed 400 body on malformed input.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;

use filedesk_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but a body that is not JSON, or whose fields have the
/// wrong types, is rejected with `400 {"message":"Invalid request"}`.
#[derive(Debug, Clone)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(reason = %rejection.body_text(), "Rejected request body");
            ApiError(AppError::validation("Invalid request"))
        })?;
        Ok(Self(value))
    }
}
