//! A single authorization rule.

use std::collections::HashSet;

use regex::Regex;

use filedesk_core::error::AppError;
use filedesk_entity::account::Role;

/// Method plus a path regex anchored at both ends.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    method: String,
    pattern: String,
    regex: Regex,
}

impl RouteMatcher {
    /// Compile `pattern` so it must match the entire path.
    pub fn new(method: &str, pattern: &str) -> Result<Self, AppError> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            AppError::configuration(format!("Invalid path pattern '{pattern}': {e}"))
        })?;
        Ok(Self {
            method: method.to_ascii_uppercase(),
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.method.eq_ignore_ascii_case(method) && self.regex.is_match(path)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Grants `roles` access to requests matched by `route`.
#[derive(Debug, Clone)]
pub struct AccessRule {
    route: RouteMatcher,
    roles: HashSet<Role>,
}

impl AccessRule {
    pub fn new(route: RouteMatcher, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            route,
            roles: roles.into_iter().collect(),
        }
    }

    /// True when the route matches and `role` is in the allowed set.
    pub fn permits(&self, method: &str, path: &str, role: Role) -> bool {
        self.roles.contains(&role) && self.route.matches(method, path)
    }

    pub fn route(&self) -> &RouteMatcher {
        &self.route
    }

    /// Allowed roles in a stable order, for display.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.roles.iter().copied().collect();
        roles.sort_by_key(|r| r.as_str());
        roles
    }
}
