//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use filedesk_core::config::auth::AuthConfig;
use filedesk_core::error::AppError;

/// Plaintext hashed once at construction and verified against when an
/// account does not exist, so both login failure branches do the same work.
const DUMMY_SECRET: &str = "FileDeskDummy0";

/// Hashes and verifies passwords using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the configured cost parameters.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash_password(DUMMY_SECRET)?;
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only on an unreadable hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Spend one verification's worth of work and report failure.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = self.verify_password(password, &self.dummy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(&AuthConfig {
            hash_memory_kib: 8,
            hash_iterations: 1,
            hash_parallelism: 1,
            ..AuthConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("Secret123", &hash).unwrap());
        assert!(!hasher.verify_password("Secret124", &hash).unwrap());
    }

    #[test]
    fn salts_differ() {
        let hasher = fast_hasher();
        let a = hasher.hash_password("Secret123").unwrap();
        let b = hasher.hash_password("Secret123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn dummy_never_matches() {
        let hasher = fast_hasher();
        assert!(!hasher.verify_dummy(DUMMY_SECRET));
        assert!(!hasher.verify_dummy("Anything1"));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(fast_hasher().verify_password("x", "not-a-hash").is_err());
    }

    #[test]
    fn bad_params_are_rejected() {
        let err = PasswordHasher::new(&AuthConfig {
            hash_memory_kib: 0,
            ..AuthConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, filedesk_core::ErrorKind::Configuration);
    }
}
