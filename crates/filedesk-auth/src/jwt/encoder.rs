//! Token issuance.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use filedesk_core::config::auth::AuthConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_entity::account::Role;

use super::claims::Claims;

/// Signs claims into HS256 bearer tokens with a fixed lifetime.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::minutes(config.token_ttl_minutes as i64),
        }
    }

    /// Issue a token for `user_id` valid from now.
    pub fn issue(&self, user_id: &str, role: Role, rid: Option<Uuid>) -> Result<String, AppError> {
        self.issue_at(user_id, role, rid, Utc::now())
    }

    /// Issue a token as if it were signed at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: &str,
        role: Role,
        rid: Option<Uuid>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            rid,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to sign token", e))
    }
}
