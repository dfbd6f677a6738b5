//! Account operations.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use filedesk_auth::jwt::JwtEncoder;
use filedesk_auth::password::{PasswordHasher, PasswordPolicy};
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_database::store::AccountStore;
use filedesk_entity::account::{AccountProfile, NewAccount, Role};

use crate::bounded::bounded;
use crate::cascade::{CascadeReport, CascadingDeleteCoordinator};
use crate::context::Principal;

const MAX_USERNAME_LEN: usize = 50;

/// Message shared by both login failure branches.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    /// `None` defaults to [`Role::User`].
    pub role: Option<String>,
}

/// Handles credential checks and account lifecycle.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordPolicy,
    encoder: Arc<JwtEncoder>,
    cascade: Arc<CascadingDeleteCoordinator>,
    call_timeout: Duration,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        cascade: Arc<CascadingDeleteCoordinator>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            accounts,
            hasher,
            policy: PasswordPolicy::new(),
            encoder,
            cascade,
            call_timeout,
        }
    }

    /// Check a username/password pair and issue a bearer token.
    ///
    /// An unknown username and a wrong password fail identically, and both
    /// perform one hash verification.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Invalid request"));
        }

        let account = bounded(
            self.call_timeout,
            "find account by username",
            self.accounts.find_by_username(username),
        )
        .await?;

        let verified = match &account {
            Some(account) => self
                .hasher
                .verify_password(password, &account.password_hash)?,
            None => self.hasher.verify_dummy(password),
        };

        match account {
            Some(account) if verified => {
                let token = self
                    .encoder
                    .issue(&account.user_id, account.role, Some(account.id))?;
                info!(user_id = %account.user_id, "Login succeeded");
                Ok(token)
            }
            _ => {
                info!("Login rejected");
                Err(AppError::unauthenticated(INVALID_CREDENTIALS))
            }
        }
    }

    /// Validate and persist a new account. The returned profile carries no
    /// password hash.
    pub async fn register(&self, input: Registration) -> AppResult<AccountProfile> {
        let username = input.username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::validation("Invalid username"));
        }

        self.policy.validate(&input.password)?;

        let role = match input.role.as_deref() {
            None => Role::User,
            Some(role) => role.parse::<Role>()?,
        };

        let existing = bounded(
            self.call_timeout,
            "find account by username",
            self.accounts.find_by_username(username),
        )
        .await?;
        if existing.is_some() {
            return Err(AppError::conflict("Username already exists"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user_id = bounded(
            self.call_timeout,
            "allocate user id",
            self.accounts.next_user_id(),
        )
        .await?;

        let account = bounded(
            self.call_timeout,
            "insert account",
            self.accounts.insert(NewAccount {
                user_id,
                username: username.to_string(),
                password_hash,
                role,
            }),
        )
        .await?;

        info!(user_id = %account.user_id, role = %account.role, "Account created");
        Ok(AccountProfile::from(account))
    }

    /// Every account, without password hashes.
    pub async fn list_all(&self) -> AppResult<Vec<AccountProfile>> {
        let accounts = bounded(self.call_timeout, "list accounts", self.accounts.list()).await?;
        Ok(accounts.into_iter().map(AccountProfile::from).collect())
    }

    /// Remove an account after best-effort cleanup of its files.
    ///
    /// Cleanup failures never block the removal.
    pub async fn remove(&self, user_id: &str, actor: Option<&Principal>) -> AppResult<CascadeReport> {
        let account = bounded(
            self.call_timeout,
            "find account by user id",
            self.accounts.find_by_user_id(user_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        let report = self
            .cascade
            .cascade(
                &account.user_id,
                &account.username,
                actor.map(|p| p.user_id.as_str()),
            )
            .await;
        if !report.is_complete() {
            warn!(user_id, failures = report.failures, "Account removed with incomplete file cleanup");
        }

        let removed = bounded(
            self.call_timeout,
            "delete account",
            self.accounts.delete_by_user_id(&account.user_id),
        )
        .await?;
        if !removed {
            return Err(AppError::new(ErrorKind::NotFound, "User not found"));
        }

        info!(user_id, "Account removed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use filedesk_auth::jwt::JwtDecoder;
    use filedesk_auth::password::PASSWORD_POLICY_MESSAGE;
    use filedesk_core::config::auth::AuthConfig;
    use filedesk_database::repositories::MemoryAccountStore;

    use super::*;

    fn auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "account-service-test".to_string(),
            hash_memory_kib: 8,
            hash_iterations: 1,
            hash_parallelism: 1,
            ..AuthConfig::default()
        }
    }

    fn service() -> (AccountService, Arc<MemoryAccountStore>) {
        let cfg = auth_config();
        let store = Arc::new(MemoryAccountStore::new());
        let service = AccountService::new(
            store.clone(),
            Arc::new(PasswordHasher::new(&cfg).unwrap()),
            Arc::new(JwtEncoder::new(&cfg)),
            Arc::new(CascadingDeleteCoordinator::unregistered()),
            Duration::from_secs(5),
        );
        (service, store)
    }

    fn registration(username: &str, password: &str, role: Option<&str>) -> Registration {
        Registration {
            username: username.to_string(),
            password: password.to_string(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn register_then_login_carries_role() {
        let (service, _) = service();
        let decoder = JwtDecoder::new(&auth_config());

        for (name, role) in [("ada", Role::Admin), ("bob", Role::User)] {
            service
                .register(registration(name, "Password1", Some(role.as_str())))
                .await
                .unwrap();
            let token = service.authenticate(name, "Password1").await.unwrap();
            assert_eq!(decoder.verify(&token).unwrap().role, role);
        }
    }

    #[tokio::test]
    async fn role_defaults_to_user() {
        let (service, _) = service();
        let profile = service
            .register(registration("carol", "Password1", None))
            .await
            .unwrap();
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.user_id, "1");
    }

    #[tokio::test]
    async fn username_is_trimmed() {
        let (service, _) = service();
        let profile = service
            .register(registration("  dave  ", "Password1", None))
            .await
            .unwrap();
        assert_eq!(profile.username, "dave");
        assert!(service.authenticate(" dave ", "Password1").await.is_ok());
    }

    #[tokio::test]
    async fn weak_passwords_fail_with_policy_message() {
        let (service, _) = service();
        for weak in ["password", "PASSWORD", "Password", "short1"] {
            let err = service
                .register(registration("erin", weak, None))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, PASSWORD_POLICY_MESSAGE);
        }
    }

    #[tokio::test]
    async fn invalid_username_and_role_are_rejected() {
        let (service, _) = service();
        let err = service
            .register(registration("   ", "Password1", None))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid username");

        let long = "x".repeat(51);
        assert!(service.register(registration(&long, "Password1", None)).await.is_err());

        let err = service
            .register(registration("frank", "Password1", Some("Root")))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Invalid user role");
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let (service, _) = service();
        service
            .register(registration("gina", "Password1", None))
            .await
            .unwrap();
        let err = service
            .register(registration("gina", "Password2", None))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Username already exists");
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let (service, _) = service();
        service
            .register(registration("hank", "Password1", None))
            .await
            .unwrap();

        let unknown = service.authenticate("nouser", "Anything1").await.unwrap_err();
        let wrong = service.authenticate("hank", "Wrong1234").await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::Unauthenticated);
        assert_eq!(unknown.kind, wrong.kind);
        assert_eq!(unknown.message, wrong.message);
        assert_eq!(unknown.message, INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn login_is_case_sensitive() {
        let (service, _) = service();
        service
            .register(registration("Ivy", "Password1", None))
            .await
            .unwrap();
        assert!(service.authenticate("ivy", "Password1").await.is_err());
    }

    #[tokio::test]
    async fn listing_never_exposes_hashes() {
        let (service, _) = service();
        service
            .register(registration("jack", "Password1", None))
            .await
            .unwrap();
        let listed = service.list_all().await.unwrap();
        let json = serde_json::to_string(&listed).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
    }

    #[tokio::test]
    async fn remove_twice_is_not_found_the_second_time() {
        let (service, store) = service();
        let profile = service
            .register(registration("kate", "Password1", None))
            .await
            .unwrap();

        let report = service.remove(&profile.user_id, None).await.unwrap();
        assert!(report.skipped);
        assert!(store.find_by_user_id(&profile.user_id).await.unwrap().is_none());

        let err = service.remove(&profile.user_id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "User not found");
    }

    #[tokio::test]
    async fn user_ids_are_not_reused() {
        let (service, _) = service();
        let first = service
            .register(registration("leo", "Password1", None))
            .await
            .unwrap();
        service.remove(&first.user_id, None).await.unwrap();
        let second = service
            .register(registration("leo", "Password1", None))
            .await
            .unwrap();
        assert_ne!(first.user_id, second.user_id);
    }
}
