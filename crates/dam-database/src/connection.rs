//! Read-only connections to the legacy media catalog.
//!
//! Every session is opened with `default_transaction_read_only` and a
//! statement timeout, so an import can neither write to the catalog nor
//! hold a long-running query open after the importer gave up on it.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use dam_core::config::DatabaseConfig;
use dam_core::error::{AppError, ErrorKind};

/// Pool of read-only sessions on the source catalog.
#[derive(Debug, Clone)]
pub struct SourceConnection {
    pool: PgPool,
}

impl SourceConnection {
    /// Opens the pool described by `config`.
    ///
    /// # Errors
    ///
    /// `Configuration` for an unparsable URL, `Database` when no session can
    /// be established.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(config)?;
        info!(
            catalog = %describe(&options),
            max_connections = config.max_connections,
            statement_timeout_seconds = config.statement_timeout_seconds,
            "Connecting to source catalog"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to source catalog: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn into_pool(self) -> PgPool {
        self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Source catalog connections closed");
    }
}

/// Session options for the catalog: read-only, bounded statements, tagged
/// with the configured application name.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, AppError> {
    let mut settings = vec![("default_transaction_read_only", "on".to_string())];
    if config.statement_timeout_seconds > 0 {
        settings.push((
            "statement_timeout",
            format!("{}s", config.statement_timeout_seconds),
        ));
    }

    Ok(PgConnectOptions::from_str(&config.url)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid database.url: {e}"),
                e,
            )
        })?
        .application_name(&config.application_name)
        .options(settings))
}

/// The catalog URL without credentials, for logs and `config show`.
pub fn redacted_url(url: &str) -> String {
    match PgConnectOptions::from_str(url) {
        Ok(options) => describe(&options),
        Err(_) => "<invalid url>".to_string(),
    }
}

fn describe(options: &PgConnectOptions) -> String {
    format!(
        "postgres://{}@{}:{}/{}",
        options.get_username(),
        options.get_host(),
        options.get_port(),
        options.get_database().unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_redacted_url_drops_password() {
        let shown = redacted_url("postgres://media:secret@db:5433/neos");
        assert_eq!(shown, "postgres://media@db:5433/neos");
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_redacted_url_rejects_garbage() {
        assert_eq!(redacted_url("not a url"), "<invalid url>");
    }

    #[test]
    fn test_connect_options_tag_the_session() {
        let options = connect_options(&DatabaseConfig {
            application_name: "dam-test".to_string(),
            ..config("postgres://media@db/neos")
        })
        .unwrap();
        assert_eq!(options.get_application_name(), Some("dam-test"));
        assert_eq!(options.get_database(), Some("neos"));
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let err = connect_options(&config("not a url")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
