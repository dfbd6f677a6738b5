//! Password complexity rules for new accounts.

use filedesk_core::error::AppError;

/// User-facing text returned for every policy violation.
pub const PASSWORD_POLICY_MESSAGE: &str = "Password has to be at least 8 characters long, include one uppercase letter, one lowercase letter, and one number.";

const MIN_LENGTH: usize = 8;

/// At least eight ASCII letters and digits, with one of each of upper
/// case, lower case and digit. Anything else (spaces, symbols, non-ASCII)
/// is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn is_satisfied_by(&self, password: &str) -> bool {
        password.len() >= MIN_LENGTH
            && password.chars().all(|c| c.is_ascii_alphanumeric())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
    }

    /// Returns a validation error carrying the fixed policy message.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if self.is_satisfied_by(password) {
            Ok(())
        } else {
            Err(AppError::validation(PASSWORD_POLICY_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_alphanumeric() {
        let policy = PasswordPolicy::new();
        assert!(policy.validate("Password1").is_ok());
        assert!(policy.validate("aB345678").is_ok());
    }

    #[test]
    fn each_missing_class_fails_with_fixed_message() {
        let policy = PasswordPolicy::new();
        for weak in ["password", "PASSWORD", "Password", "short1", "passw0rd", "PASSW0RD"] {
            let err = policy.validate(weak).unwrap_err();
            assert_eq!(err.message, PASSWORD_POLICY_MESSAGE, "{weak}");
        }
    }

    #[test]
    fn rejects_short_even_when_complex() {
        assert!(!PasswordPolicy::new().is_satisfied_by("Ab1cdef"));
    }

    #[test]
    fn rejects_symbols_and_non_ascii() {
        let policy = PasswordPolicy::new();
        assert!(!policy.is_satisfied_by("Password1!"));
        assert!(!policy.is_satisfied_by("Pass word1"));
        assert!(!policy.is_satisfied_by("Pässword1"));
    }
}
