//! Access gate: bearer token verification plus the endpoint rule table.
//!
//! Runs on every routed request of a service. Outcomes:
//! - public endpoint: passes through untouched;
//! - no usable `Authorization: Bearer <token>` header: 401 `Unauthorized`;
//! - token fails verification for any reason: 403 `Forbidden`;
//! - verified role not permitted by the first matching rule: 403 `Forbidden`;
//! - otherwise the [`Principal`] is attached to the request extensions.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use filedesk_auth::jwt::JwtDecoder;
use filedesk_auth::rbac::AccessPolicy;
use filedesk_core::error::AppError;
use filedesk_service::Principal;

use crate::error::ApiError;

/// Verifier and rule table for one service.
#[derive(Debug)]
pub struct AccessGate {
    decoder: JwtDecoder,
    policy: AccessPolicy,
}

impl AccessGate {
    pub fn new(decoder: JwtDecoder, policy: AccessPolicy) -> Self {
        Self { decoder, policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Decide a request. `Ok(None)` means the endpoint is public.
    pub fn check(
        &self,
        method: &str,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<Option<Principal>, AppError> {
        if self.policy.is_public(method, path) {
            return Ok(None);
        }

        let Some(token) = bearer_token(headers) else {
            debug!(method, path, "Missing bearer token");
            return Err(AppError::unauthenticated("Unauthorized"));
        };

        let claims = self.decoder.verify(token).map_err(|e| {
            debug!(method, path, reason = %e, "Token rejected");
            AppError::forbidden("Forbidden")
        })?;

        if self.policy.authorize(method, path, claims.role).is_none() {
            debug!(method, path, role = %claims.role, user_id = %claims.sub, "No rule permits request");
            return Err(AppError::forbidden("Forbidden"));
        }

        Ok(Some(Principal::from(claims)))
    }
}

/// The token of an `Authorization: Bearer <token>` header, if present.
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }
    Some(token)
}

/// Axum middleware wrapping [`AccessGate::check`].
///
/// Matches against the path only; the query string is ignored.
pub async fn access_gate(
    State(gate): State<Arc<AccessGate>>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    match gate.check(&method, &path, request.headers()) {
        Ok(Some(principal)) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Ok(None) => next.run(request).await,
        Err(e) => ApiError(e).into_response(),
    }
}
