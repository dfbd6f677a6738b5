//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Shipped signing secret. Deployments must override it.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token signing and password hashing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Bearer token lifetime in minutes. Tokens are not refreshable.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2id lane count.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
        }
    }
}

impl AuthConfig {
    /// Whether tokens would be signed with the shipped placeholder secret.
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    60
}

fn default_hash_memory() -> u32 {
    19_456
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}
