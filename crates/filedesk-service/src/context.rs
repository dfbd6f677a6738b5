//! The authenticated caller of a service operation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filedesk_auth::jwt::Claims;
use filedesk_entity::account::Role;

/// Identity and role decoded from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// External account id.
    pub user_id: String,
    pub role: Role,
    /// Internal account record id, when the token carried one.
    pub rid: Option<Uuid>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            rid: None,
        }
    }

    /// Owner-or-admin check against a resource owner id.
    pub fn can_access(&self, owner_id: &str) -> bool {
        filedesk_auth::ownership::can_access(&self.user_id, self.role, owner_id)
    }
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            rid: claims.rid,
        }
    }
}
