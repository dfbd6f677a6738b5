//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and `FILEDESK__*` environment variables. Each sub-module
//! represents a logical configuration section, and every field carries a
//! default so the services start with no files present.

pub mod access;
pub mod app;
pub mod auth;
pub mod cascade;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::access::AccessConfig;
use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::cascade::CascadeConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Account and file record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and password hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Per-service endpoint authorization tables.
    #[serde(default)]
    pub access: AccessConfig,
    /// Uploaded file byte storage.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Account-deletion cleanup transport.
    #[serde(default)]
    pub cascade: CascadeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, an environment-specific overlay and
    /// environment variables prefixed with `FILEDESK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FILEDESK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot run with.
    ///
    /// Path patterns in the access tables are compiled (and rejected) when
    /// the policies are built at startup.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_minutes must be greater than zero",
            ));
        }
        if self.database.call_timeout_seconds == 0 {
            return Err(AppError::configuration(
                "database.call_timeout_seconds must be greater than zero",
            ));
        }
        for (service, policy) in [("users", &self.access.users), ("files", &self.access.files)] {
            for rule in &policy.rules {
                if rule.roles.is_empty() {
                    return Err(AppError::configuration(format!(
                        "access.{service}: rule {} {} grants no roles",
                        rule.method, rule.path
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.auth.token_ttl_minutes, 60);
        assert_eq!(config.server.users_port, 4001);
        assert_eq!(config.server.files_port, 4002);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn rule_without_roles_is_rejected() {
        let mut config = AppConfig::default();
        config.access.users.rules[0].roles.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let raw = r#"
            [auth]
            jwt_secret = "from-file"

            [cascade]
            mode = "events"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.cascade.mode, cascade::CascadeMode::Events);
        assert_eq!(config.database.backend, database::DatabaseBackend::Memory);
        assert!(!config.access.users.rules.is_empty());
    }
}
