//! A service's full authorization table.

use filedesk_core::config::access::AccessPolicyConfig;
use filedesk_core::error::AppError;
use filedesk_entity::account::Role;

use super::rule::{AccessRule, RouteMatcher};

/// Public endpoints plus ordered rules. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    public: Vec<(String, String)>,
    rules: Vec<AccessRule>,
}

impl AccessPolicy {
    /// Compile a policy from configuration. Unknown roles and invalid path
    /// patterns are configuration errors.
    pub fn from_config(config: &AccessPolicyConfig) -> Result<Self, AppError> {
        let public = config
            .public
            .iter()
            .map(|e| (e.method.to_ascii_uppercase(), e.path.clone()))
            .collect();

        let rules = config
            .rules
            .iter()
            .map(|rule| {
                let route = RouteMatcher::new(&rule.method, &rule.path)?;
                let roles = rule
                    .roles
                    .iter()
                    .map(|r| {
                        r.parse::<Role>().map_err(|_| {
                            AppError::configuration(format!(
                                "Unknown role '{r}' in rule {} {}",
                                rule.method, rule.path
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(AccessRule::new(route, roles))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { public, rules })
    }

    /// Whether the endpoint skips token verification entirely.
    pub fn is_public(&self, method: &str, path: &str) -> bool {
        self.public
            .iter()
            .any(|(m, p)| m.eq_ignore_ascii_case(method) && p == path)
    }

    /// First rule that matches the method and path and grants `role`.
    pub fn authorize(&self, method: &str, path: &str, role: Role) -> Option<&AccessRule> {
        self.rules.iter().find(|rule| rule.permits(method, path, role))
    }

    pub fn rules(&self) -> &[AccessRule] {
        &self.rules
    }

    pub fn public_endpoints(&self) -> &[(String, String)] {
        &self.public
    }
}
