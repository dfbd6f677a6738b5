//! Extractor for the principal attached by the access gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use filedesk_core::error::AppError;
use filedesk_service::Principal;

use crate::error::ApiError;

/// The verified caller of a gated route.
///
/// Rejects with 401 when the gate did not attach a principal, which only
/// happens on a route the gate treats as public.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or_else(|| ApiError(AppError::unauthenticated("Unauthorized")))
    }
}

impl std::ops::Deref for AuthPrincipal {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
