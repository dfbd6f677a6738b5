//! In-memory stores for single-node runs and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_entity::account::{Account, NewAccount};
use filedesk_entity::file::{FileRecord, NewFileRecord};

use crate::store::{AccountStore, FileRecordStore};

/// Accounts keyed by external id, with a username index.
///
/// The username index is claimed through the map's entry API, so two
/// concurrent inserts with the same username cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
    usernames: DashMap<String, String>,
    sequence: AtomicU64,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        let Some(user_id) = self.usernames.get(username).map(|e| e.value().clone()) else {
            return Ok(None);
        };
        Ok(self.accounts.get(&user_id).map(|e| e.value().clone()))
    }

    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(user_id).map(|e| e.value().clone()))
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.iter().map(|e| e.value().clone()).collect();
        accounts.sort_by_key(|a| a.user_id.parse::<u64>().unwrap_or(u64::MAX));
        Ok(accounts)
    }

    async fn next_user_id(&self) -> AppResult<String> {
        Ok((self.sequence.fetch_add(1, Ordering::SeqCst) + 1).to_string())
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        match self.usernames.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Username already exists")),
            Entry::Vacant(slot) => {
                let account = account.into_account();
                slot.insert(account.user_id.clone());
                self.accounts
                    .insert(account.user_id.clone(), account.clone());
                Ok(account)
            }
        }
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool> {
        match self.accounts.remove(user_id) {
            Some((_, account)) => {
                self.usernames.remove(&account.username);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// File records keyed by id.
#[derive(Debug, Default)]
pub struct MemoryFileRecordStore {
    files: DashMap<Uuid, FileRecord>,
}

impl MemoryFileRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRecordStore for MemoryFileRecordStore {
    async fn insert(&self, record: NewFileRecord) -> AppResult<FileRecord> {
        let record = record.into_record();
        self.files.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileRecord>> {
        Ok(self.files.get(&id).map(|e| e.value().clone()))
    }

    async fn list_by_owner(&self, user_id: &str) -> AppResult<Vec<FileRecord>> {
        let mut files: Vec<FileRecord> = self
            .files
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.files.remove(&id).is_some())
    }

    async fn delete_by_owner(&self, user_id: &str) -> AppResult<u64> {
        let before = self.files.len();
        self.files.retain(|_, record| record.user_id != user_id);
        Ok((before - self.files.len()) as u64)
    }
}
