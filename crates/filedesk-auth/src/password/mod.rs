//! Password hashing and complexity policy.

pub mod hasher;
pub mod policy;

pub use hasher::PasswordHasher;
pub use policy::{PASSWORD_POLICY_MESSAGE, PasswordPolicy};
