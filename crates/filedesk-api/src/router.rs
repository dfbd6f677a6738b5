//! Route definitions for the users service, the files service and the
//! gateway that mounts both.
//!
//! Paths are relative to each service root. The access gate is installed
//! with `route_layer`, so unknown paths fall through to the 404 fallback
//! without being authenticated.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router, extract::DefaultBodyLimit, middleware as axum_middleware};
use tower_http::trace::TraceLayer;

use filedesk_core::config::AppConfig;

use crate::error::ApiErrorResponse;
use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::gate::access_gate;
use crate::middleware::logging::request_logging;
use crate::middleware::timeout::request_timeout;
use crate::state::{FilesState, UsersState};

/// Users service router with its outer layers.
pub fn users_router(state: UsersState) -> Router {
    let config = state.config.clone();
    with_service_layers(users_routes(state).fallback(route_not_found), &config)
}

/// Files service router with its outer layers.
pub fn files_router(state: FilesState) -> Router {
    let config = state.config.clone();
    with_service_layers(files_routes(state).fallback(route_not_found), &config)
}

/// Single-origin router: `/users/*` and `/files/*` are forwarded to the
/// two services with the prefix stripped.
pub fn gateway_router(users: UsersState, files: FilesState) -> Router {
    let config = users.config.clone();
    let app = Router::new()
        .route("/health", get(handlers::health::gateway_health))
        .nest("/users", users_routes(users))
        .nest("/files", files_routes(files))
        .fallback(api_route_not_found);
    with_service_layers(app, &config)
}

fn users_routes(state: UsersState) -> Router {
    let gate = state.gate.clone();
    Router::new()
        .route(
            "/login",
            post(handlers::account::login).get(handlers::account::session),
        )
        .route("/register", post(handlers::account::register))
        .route("/logout", get(handlers::account::logout))
        .route("/admin", get(handlers::admin::list_users))
        .route("/admin/create_user", post(handlers::admin::create_user))
        .route(
            "/admin/delete_user/{id}",
            delete(handlers::admin::delete_user),
        )
        .route("/health", get(handlers::health::users_health))
        .route_layer(axum_middleware::from_fn_with_state(gate, access_gate))
        .with_state(state)
}

fn files_routes(state: FilesState) -> Router {
    let gate = state.gate.clone();
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    Router::new()
        .route(
            "/",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route("/{id}", delete(handlers::file::delete_file))
        .route("/{id}/download", get(handlers::file::download_file))
        .route("/health", get(handlers::health::files_health))
        .route_layer(axum_middleware::from_fn_with_state(gate, access_gate))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}

fn with_service_layers(router: Router, config: &AppConfig) -> Router {
    let limit = Duration::from_secs(config.server.request_timeout_seconds);
    router
        .layer(axum_middleware::from_fn_with_state(limit, request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.server.cors))
        .layer(axum_middleware::from_fn(request_logging))
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("Route not found")),
    )
}

async fn api_route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("API route not found")),
    )
}
