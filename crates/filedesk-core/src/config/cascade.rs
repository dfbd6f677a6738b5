//! Account-deletion cleanup configuration.

use serde::{Deserialize, Serialize};

/// How the users side reaches file records when an account is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CascadeMode {
    /// File records and bytes are reachable in-process.
    #[default]
    Local,
    /// Publish an account-deleted event for the files side to consume.
    Events,
    /// File records are not registered here; cleanup is skipped.
    Disabled,
}

/// Cascade transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Selected transport.
    #[serde(default)]
    pub mode: CascadeMode,
    /// Event channel name (events mode).
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Redis URL for multi-process event delivery. Empty keeps events
    /// in-process.
    #[serde(default)]
    pub redis_url: String,
    /// In-process broadcast buffer size.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            mode: CascadeMode::default(),
            channel: default_channel(),
            redis_url: String::new(),
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_channel() -> String {
    "filedesk:accounts".to_string()
}

fn default_buffer_size() -> usize {
    256
}
