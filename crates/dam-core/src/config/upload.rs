//! Upload limits reported to clients.

use serde::{Deserialize, Serialize};

/// Upload limits. Enforcement belongs to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Maximum number of files per upload request.
    #[serde(default = "default_max_file_upload_limit")]
    pub max_file_upload_limit: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_file_upload_limit: default_max_file_upload_limit(),
        }
    }
}

fn default_max_file_size() -> u64 {
    64 * 1024 * 1024
}

fn default_max_file_upload_limit() -> u32 {
    10
}
