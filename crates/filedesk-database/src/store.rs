//! Store traits consumed by the service layer.

use async_trait::async_trait;
use uuid::Uuid;

use filedesk_core::result::AppResult;
use filedesk_entity::account::{Account, NewAccount};
use filedesk_entity::file::{FileRecord, NewFileRecord};

/// Persistence for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// Exact, case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    /// Lookup by external id.
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Account>>;

    /// Every account, ordered by external id.
    async fn list(&self) -> AppResult<Vec<Account>>;

    /// Allocate the next external id. Values are never handed out twice.
    async fn next_user_id(&self) -> AppResult<String>;

    /// Persist a new account.
    ///
    /// Fails with `ErrorKind::Conflict` when the username is already taken,
    /// even if a concurrent writer got there between a caller's pre-check
    /// and this call.
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;

    /// Remove the account with the given external id. Returns whether a
    /// row was removed.
    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool>;
}

/// Persistence for file metadata.
#[async_trait]
pub trait FileRecordStore: Send + Sync + std::fmt::Debug + 'static {
    async fn insert(&self, record: NewFileRecord) -> AppResult<FileRecord>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>>;

    /// Files owned by `user_id`, newest upload first.
    async fn list_by_owner(&self, user_id: &str) -> AppResult<Vec<FileRecord>>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool>;

    /// Bulk-remove every record owned by `user_id`; returns the count.
    async fn delete_by_owner(&self, user_id: &str) -> AppResult<u64>;
}
