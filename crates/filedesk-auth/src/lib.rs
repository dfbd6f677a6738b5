//! # filedesk-auth
//!
//! Authentication and authorization primitives for FileDesk.
//!
//! ## Modules
//!
//! - `jwt`: bearer token issuance and verification
//! - `password`: Argon2id hashing and the password complexity policy
//! - `rbac`: the per-service `(method, path, roles)` rule table
//! - `ownership`: owner-or-admin checks on file resources

pub mod jwt;
pub mod ownership;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenError};
pub use password::{PasswordHasher, PasswordPolicy};
pub use rbac::{AccessPolicy, AccessRule, RouteMatcher};
