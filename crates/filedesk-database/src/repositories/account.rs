//! PostgreSQL account repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_entity::account::{Account, NewAccount};

use crate::store::AccountStore;

/// Repository for account rows.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by username", e)
            })
    }

    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by user id", e)
            })
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY user_id::BIGINT ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }

    async fn next_user_id(&self) -> AppResult<String> {
        let next: i64 = sqlx::query_scalar("SELECT nextval('account_user_id_seq')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to allocate user id", e)
            })?;
        Ok(next.to_string())
    }

    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, user_id, username, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&account.user_id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::with_source(ErrorKind::Conflict, "Username already exists", e)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
        })
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete account", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
