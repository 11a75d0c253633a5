//! Asset query configuration.

use serde::{Deserialize, Serialize};

/// Pagination bounds applied by the filter composer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size used when a request omits `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Largest accepted `limit`.
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u32 {
    20
}

fn default_max_limit() -> u32 {
    500
}
