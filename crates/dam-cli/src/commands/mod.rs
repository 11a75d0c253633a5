//! CLI command definitions and dispatch.

pub mod config;
pub mod import;
pub mod plan;
pub mod search;
pub mod setup;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use dam_contracts::SourceCatalog;
use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_database::{PgSourceCatalog, SourceConnection};
use dam_memory::{MemoryDam, SnapshotCatalog};

/// DAM bridge: import the legacy media catalog and query the result
#[derive(Debug, Parser)]
#[command(name = "dam", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepare the DAM storage
    Setup,
    /// Import the legacy catalog into the DAM
    Import(import::ImportArgs),
    /// Show the folder creation order without importing
    Plan(plan::PlanArgs),
    /// Search imported assets
    Search(search::SearchArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Setup => setup::execute(&config).await,
            Commands::Import(args) => import::execute(args, &config, self.format).await,
            Commands::Plan(args) => plan::execute(args, &config, self.format).await,
            Commands::Search(args) => search::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, &config, self.format),
        }
    }
}

/// Where the legacy catalog is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// A JSON export of the catalog
    Snapshot,
    /// The legacy PostgreSQL database from `database.url`
    Postgres,
}

/// Source catalog selection shared by import and plan
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Catalog source
    #[arg(long, value_enum, default_value = "snapshot")]
    pub source: SourceKind,

    /// JSON export to read with `--source snapshot`
    #[arg(long, default_value = "data/catalog.json")]
    pub snapshot: String,
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::from_file(config_path)
}

/// Helper: open the DAM backed by the configured journal
pub async fn open_dam(config: &AppConfig) -> Result<Arc<MemoryDam>, AppError> {
    let dam = MemoryDam::open(&config.import.journal_path).await?;
    Ok(Arc::new(dam))
}

/// Helper: open the selected source catalog
pub async fn open_catalog(
    args: &SourceArgs,
    config: &AppConfig,
) -> Result<Arc<dyn SourceCatalog>, AppError> {
    match args.source {
        SourceKind::Snapshot => Ok(Arc::new(
            SnapshotCatalog::from_json_file(&args.snapshot).await?,
        )),
        SourceKind::Postgres => {
            let connection = SourceConnection::connect(&config.database).await?;
            let catalog = PgSourceCatalog::new(connection.into_pool());
            catalog.verify_schema().await?;
            Ok(Arc::new(catalog))
        }
    }
}
