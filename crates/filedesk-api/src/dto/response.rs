//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Plain `{message}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Successful self-registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredResponse {
    pub message: String,
    pub user_id: String,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when a dependency is unavailable.
    pub status: String,
    pub service: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub storage: Option<StorageHealth>,
}

/// Byte store section of the files health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageHealth {
    pub provider: String,
    pub available: bool,
}
