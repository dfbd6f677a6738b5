//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A registered account.
///
/// `id` is the internal storage key; `user_id` is the external numeric
/// string handed to clients and embedded in tokens. It is assigned once
/// and never reused.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Internal record identifier.
    pub id: Uuid,
    /// External identifier (decimal string of a monotonic counter).
    pub user_id: String,
    /// Unique, trimmed login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// The outward-facing view of an [`Account`].
///
/// Carries no hash field at all, so no serializer setting can leak it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountProfile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            user_id: account.user_id,
            username: account.username,
            role: account.role,
            created_at: account.created_at,
        }
    }
}

/// Data required to persist a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Pre-allocated external identifier.
    pub user_id: String,
    /// Trimmed username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
}

impl NewAccount {
    /// Materialize the row the store will hold.
    pub fn into_account(self) -> Account {
        Account {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
            created_at: Utc::now(),
        }
    }
}
