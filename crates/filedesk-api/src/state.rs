//! Shared state for the users and files services.
//!
//! Each service gets its own state type; the gateway builds both. All
//! fields are `Arc`-wrapped for cheap cloning across tasks.

use std::sync::Arc;

use filedesk_core::config::AppConfig;
use filedesk_service::{AccountService, FileService};

use crate::middleware::gate::AccessGate;

/// State for the users service router.
#[derive(Debug, Clone)]
pub struct UsersState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Account operations
    pub accounts: Arc<AccountService>,
    /// Token verification and the users endpoint table
    pub gate: Arc<AccessGate>,
}

/// State for the files service router.
#[derive(Debug, Clone)]
pub struct FilesState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// File operations
    pub files: Arc<FileService>,
    /// Token verification and the files endpoint table
    pub gate: Arc<AccessGate>,
}
