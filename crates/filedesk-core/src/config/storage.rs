//! Byte storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded file contents live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_root")]
    pub root_path: String,
    /// Maximum upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_root() -> String {
    "./data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    52_428_800
}
