//! Endpoint authorization tables.
//!
//! Each service carries its own ordered rule list plus a list of endpoints
//! that bypass the gate entirely. Paths are relative to the service root
//! and rule paths are regular expressions matched against the whole path.

use serde::{Deserialize, Serialize};

/// Authorization tables for both services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Users service table.
    #[serde(default = "default_users_policy")]
    pub users: AccessPolicyConfig,
    /// Files service table.
    #[serde(default = "default_files_policy")]
    pub files: AccessPolicyConfig,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            users: default_users_policy(),
            files: default_files_policy(),
        }
    }
}

/// One service's endpoint authorization table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccessPolicyConfig {
    /// Endpoints that skip token verification.
    #[serde(default)]
    pub public: Vec<EndpointConfig>,
    /// Ordered rules; the first match wins.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// An exact method + path pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub method: String,
    pub path: String,
}

/// A `(method, path pattern, roles)` authorization entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub method: String,
    pub path: String,
    pub roles: Vec<String>,
}

fn endpoint(method: &str, path: &str) -> EndpointConfig {
    EndpointConfig {
        method: method.to_string(),
        path: path.to_string(),
    }
}

fn rule(method: &str, path: &str, roles: &[&str]) -> RuleConfig {
    RuleConfig {
        method: method.to_string(),
        path: path.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Default users table: login and registration are open, everything else
/// needs a verified token.
pub fn default_users_policy() -> AccessPolicyConfig {
    AccessPolicyConfig {
        public: vec![
            endpoint("POST", "/login"),
            endpoint("POST", "/register"),
            endpoint("GET", "/health"),
        ],
        rules: vec![
            rule("GET", "/login", &["Admin", "User"]),
            rule("GET", "/logout", &["Admin", "User"]),
            rule("GET", "/admin", &["Admin"]),
            rule("POST", "/admin/create_user", &["Admin"]),
            rule("DELETE", "/admin/delete_user/[0-9]+", &["Admin"]),
        ],
    }
}

/// Default files table: any authenticated role may reach every file
/// endpoint; per-file ownership is decided downstream.
pub fn default_files_policy() -> AccessPolicyConfig {
    AccessPolicyConfig {
        public: vec![endpoint("GET", "/health")],
        rules: vec![
            rule("GET", "/", &["Admin", "User"]),
            rule("POST", "/", &["Admin", "User"]),
            rule("DELETE", "/[^/]+", &["Admin", "User"]),
            rule("GET", "/[^/]+/download", &["Admin", "User"]),
        ],
    }
}
