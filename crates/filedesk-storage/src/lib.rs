//! # filedesk-storage
//!
//! Byte storage for uploaded files. Only the local filesystem is
//! supported; record metadata lives in `filedesk-database`.

pub mod local;
pub mod mime;

pub use local::LocalStorageProvider;
