//! # filedesk-database
//!
//! Record store traits for accounts and file metadata, with a PostgreSQL
//! implementation (sqlx) and an in-memory implementation (dashmap).

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{AccountStore, FileRecordStore};
