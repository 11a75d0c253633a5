//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_database::connection::redacted_url;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = redacted_url(&shown.database.url);
            output::print_item(&shown, format);
        }
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Database", &redacted_url(&config.database.url));
            output::print_kv("Journal", &config.import.journal_path);
            output::print_kv(
                "Query limits",
                &format!("{} / {}", config.query.default_limit, config.query.max_limit),
            );
            output::print_kv(
                "Logging",
                &format!("{} ({})", config.logging.level, config.logging.format),
            );
        }
    }

    Ok(())
}
