//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Blob store backend to use: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Root directory for the local blob store.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum upload size in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Per-operation timeout in seconds for store calls made by the file
    /// service. An elapsed timeout surfaces as a cancelled operation.
    #[serde(default = "default_op_timeout")]
    pub op_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            root_path: default_root_path(),
            max_upload_size_bytes: default_max_upload(),
            op_timeout_seconds: default_op_timeout(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_root_path() -> String {
    "data/blobs".to_string()
}

fn default_max_upload() -> u64 {
    100 * 1024 * 1024
}

fn default_op_timeout() -> u64 {
    30
}
