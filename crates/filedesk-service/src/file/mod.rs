//! Per-owner file upload, listing, download, and deletion.

pub mod service;

pub use service::{FileService, StorageStatus, Upload};
