//! # filedesk-core
//!
//! Core crate for FileDesk. Contains configuration schemas, the storage
//! provider trait, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
