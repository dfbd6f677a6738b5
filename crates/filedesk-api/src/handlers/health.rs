//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{HealthResponse, StorageHealth};
use crate::state::FilesState;

fn healthy(service: &str, services: Vec<String>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: service.to_string(),
        services,
        storage: None,
    })
}

/// GET /health on the users service
pub async fn users_health() -> Json<HealthResponse> {
    healthy("users", Vec::new())
}

/// GET /health on the files service, including the byte store.
pub async fn files_health(State(state): State<FilesState>) -> Json<HealthResponse> {
    let storage = state.files.storage_status().await;
    let status = if storage.available { "ok" } else { "degraded" };
    Json(HealthResponse {
        status: status.to_string(),
        service: "files".to_string(),
        services: Vec::new(),
        storage: Some(StorageHealth {
            provider: storage.provider,
            available: storage.available,
        }),
    })
}

/// GET /health on the gateway
pub async fn gateway_health() -> Json<HealthResponse> {
    healthy("gateway", vec!["users".to_string(), "files".to_string()])
}
