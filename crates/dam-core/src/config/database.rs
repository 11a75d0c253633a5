//! Source catalog database configuration.

use serde::{Deserialize, Serialize};

/// Connection pool configuration for the legacy media catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL of the source catalog.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Server-side limit per catalog query in seconds (0 = none).
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_seconds: u64,
    /// `application_name` reported to the catalog server.
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_seconds: default_connect_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            statement_timeout_seconds: default_statement_timeout(),
            application_name: default_application_name(),
        }
    }
}

fn default_url() -> String {
    "postgres://localhost:5432/media".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_statement_timeout() -> u64 {
    120
}

fn default_application_name() -> String {
    "dam-import".to_string()
}
