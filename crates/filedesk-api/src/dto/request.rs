//! Request DTOs with shape validation.
//!
//! Only registration length limits are checked here. Trimming, password complexity,
//! role parsing and uniqueness belong to `AccountService`.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use filedesk_core::error::AppError;
use filedesk_service::account::service::Registration;

/// Login request body. Not length-checked: any mismatch is reported as
/// invalid credentials by `AccountService::authenticate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register` and `POST /admin/create_user`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(length(max = 255, message = "Password must be at most 255 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            username: req.username,
            password: req.password,
            role: req.role,
        }
    }
}

/// Run derive validation and fold every violation into one 400.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|errors| AppError::validation(join_messages(&errors)))
}

fn join_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
        .collect();
    messages.sort();
    if messages.is_empty() {
        "Invalid request".to_string()
    } else {
        messages.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_username_is_rejected() {
        let req = RegisterRequest {
            username: "u".repeat(51),
            password: "Passw0rd".into(),
            role: None,
        };
        let err = validate_body(&req).unwrap_err();
        assert_eq!(err.message, "Username must be 1 to 50 characters");
    }

    #[test]
    fn violations_are_joined() {
        let req = RegisterRequest {
            username: String::new(),
            password: "P".repeat(256),
            role: None,
        };
        let err = validate_body(&req).unwrap_err();
        assert_eq!(
            err.message,
            "Password must be at most 255 characters, Username must be 1 to 50 characters"
        );
    }

    #[test]
    fn well_formed_body_passes() {
        let req = RegisterRequest {
            username: "alice".into(),
            password: "Passw0rd".into(),
            role: Some("user".into()),
        };
        assert!(validate_body(&req).is_ok());
    }
}
