//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a serde default so that an empty
//! configuration is valid.

pub mod database;
pub mod import;
pub mod logging;
pub mod query;
pub mod upload;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::import::ImportConfig;
pub use self::logging::LoggingConfig;
pub use self::query::QueryConfig;
pub use self::upload::UploadConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Source catalog database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Import pipeline settings.
    #[serde(default)]
    pub import: ImportConfig,
    /// Asset query settings.
    #[serde(default)]
    pub query: QueryConfig,
    /// Upload limits exposed to clients.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `DAM__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file path plus `DAM__` environment
    /// variables.
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("DAM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject combinations that would make the query or import layers unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.query.default_limit == 0 {
            return Err(AppError::configuration("query.default_limit must be at least 1"));
        }
        if self.query.max_limit < self.query.default_limit {
            return Err(AppError::configuration(
                "query.max_limit must not be lower than query.default_limit",
            ));
        }
        if self.import.max_batch_size == 0 {
            return Err(AppError::configuration("import.max_batch_size must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_yields_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(file).expect("write");

        let path = file.path().to_string_lossy().to_string();
        let config = AppConfig::from_file(&path).expect("load");
        assert_eq!(config.query.default_limit, 20);
        assert!(!config.import.abort_on_rejection);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sections_override_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("tempfile");
        writeln!(
            file,
            "[import]\nabort_on_rejection = true\nmax_batch_size = 10\n\n[query]\nmax_limit = 50\n"
        )
        .expect("write");

        let path = file.path().to_string_lossy().to_string();
        let config = AppConfig::from_file(&path).expect("load");
        assert!(config.import.abort_on_rejection);
        assert_eq!(config.import.max_batch_size, 10);
        assert_eq!(config.query.max_limit, 50);
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let mut config = AppConfig::default();
        config.query.max_limit = 5;
        assert!(config.validate().is_err());
    }
}
