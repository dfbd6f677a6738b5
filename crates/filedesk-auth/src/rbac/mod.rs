//! Endpoint authorization: an ordered `(method, path pattern, roles)` table
//! consulted once per request after token verification.

pub mod policy;
pub mod rule;

pub use policy::AccessPolicy;
pub use rule::{AccessRule, RouteMatcher};
