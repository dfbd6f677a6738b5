//! Public account handlers: login, register, logout, session check.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use filedesk_entity::account::Role;

use crate::dto::request::{LoginRequest, RegisterRequest, validate_body};
use crate::dto::response::{MessageResponse, RegisteredResponse, TokenResponse};
use crate::error::ApiResult;
use crate::extractors::{AppJson, AuthPrincipal};
use crate::state::UsersState;

/// POST /login
pub async fn login(
    State(state): State<UsersState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.accounts.authenticate(&req.username, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /register
pub async fn register(
    State(state): State<UsersState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    validate_body(&req)?;
    let profile = state.accounts.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse {
            message: "User registered successfully".to_string(),
            user_id: profile.user_id,
        }),
    ))
}

/// GET /logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(_principal: AuthPrincipal) -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub role: Role,
}

/// GET /login
///
/// Echoes the identity carried by the presented token.
pub async fn session(principal: AuthPrincipal) -> Json<SessionResponse> {
    let principal = principal.0;
    Json(SessionResponse {
        user_id: principal.user_id,
        role: principal.role,
    })
}
