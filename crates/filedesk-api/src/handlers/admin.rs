//! Admin account handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use filedesk_entity::account::AccountProfile;

use crate::dto::request::{RegisterRequest, validate_body};
use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_user_id;
use crate::extractors::{AppJson, AuthPrincipal};
use crate::state::UsersState;

/// GET /admin
pub async fn list_users(
    State(state): State<UsersState>,
    _admin: AuthPrincipal,
) -> ApiResult<Json<Vec<AccountProfile>>> {
    Ok(Json(state.accounts.list_all().await?))
}

/// POST /admin/create_user
pub async fn create_user(
    State(state): State<UsersState>,
    admin: AuthPrincipal,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountProfile>)> {
    validate_body(&req)?;
    let profile = state.accounts.register(req.into()).await?;
    info!(admin_id = %admin.user_id, user_id = %profile.user_id, "Admin created account");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// DELETE /admin/delete_user/{id}
pub async fn delete_user(
    State(state): State<UsersState>,
    admin: AuthPrincipal,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = parse_user_id(&id)?;
    let report = state.accounts.remove(&user_id, Some(&admin.0)).await?;
    info!(
        admin_id = %admin.user_id,
        user_id = %user_id,
        files_found = report.files_found,
        cleanup_complete = report.is_complete(),
        "Admin removed account"
    );
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
