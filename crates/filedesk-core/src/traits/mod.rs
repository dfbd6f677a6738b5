//! Core traits defined in `filedesk-core` and implemented by other crates.

pub mod storage;

pub use storage::{ByteStream, StorageProvider};
