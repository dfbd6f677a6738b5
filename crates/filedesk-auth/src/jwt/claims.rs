//! Claims embedded in every bearer token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filedesk_entity::account::Role;

/// JWT claims payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account's external id.
    pub sub: String,
    /// Account role at issuance.
    pub role: Role,
    /// Internal record id of the account, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}
