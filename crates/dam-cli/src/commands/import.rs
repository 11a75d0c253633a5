//! Catalog import command.

use std::sync::Arc;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::output::{self, OutputFormat};
use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_core::traits::TracingProgress;
use dam_service::{ImportFailure, ImportPipeline, ImportReport, PassSummary};

/// Arguments for the import command
#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: super::SourceArgs,

    /// Which pass to run
    #[arg(long, value_enum, default_value = "all")]
    pub pass: PassArg,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Import pass selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PassArg {
    /// Tags, then folders, then assets
    All,
    Tags,
    Folders,
    Assets,
}

/// Pass summary display row
#[derive(Debug, Serialize, Tabled)]
struct PassRow {
    pass: String,
    total: u64,
    emitted: u64,
    duplicates: u64,
    skipped: u64,
    orphaned: u64,
    failures: usize,
}

impl From<&PassSummary> for PassRow {
    fn from(summary: &PassSummary) -> Self {
        Self {
            pass: summary.pass.to_string(),
            total: summary.total,
            emitted: summary.emitted,
            duplicates: summary.duplicates,
            skipped: summary.skipped_missing_resource,
            orphaned: summary.orphaned,
            failures: summary.failures.len(),
        }
    }
}

/// Failed record display row
#[derive(Debug, Serialize, Tabled)]
struct FailureRow {
    source_id: String,
    kind: String,
    message: String,
}

impl From<&ImportFailure> for FailureRow {
    fn from(failure: &ImportFailure) -> Self {
        Self {
            source_id: failure.source_id.clone(),
            kind: failure.kind.to_string(),
            message: failure.message.clone(),
        }
    }
}

/// Execute the import command
pub async fn execute(
    args: &ImportArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    if args.pass == PassArg::All && !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Import the whole catalog into the DAM journal '{}'?",
                config.import.journal_path
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let catalog = super::open_catalog(&args.source, config).await?;
    let dam = super::open_dam(config).await?;

    let cancel = CancellationToken::new();
    let pipeline = ImportPipeline::new(dam, catalog, config.import.clone())
        .with_progress(Arc::new(TracingProgress::new(config.import.progress_interval)))
        .with_cancellation(cancel.clone());

    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current command");
            cancel.cancel();
        }
    });

    let result = match args.pass {
        PassArg::All => pipeline.import_all().await,
        PassArg::Tags => pipeline.import_tags().await.map(single),
        PassArg::Folders => pipeline.import_folders().await.map(single),
        PassArg::Assets => pipeline.import_assets().await.map(single),
    };
    signal.abort();

    let report = result?;
    print_report(&report, format);
    Ok(())
}

fn single(summary: PassSummary) -> ImportReport {
    ImportReport {
        passes: vec![summary],
    }
}

fn print_report(report: &ImportReport, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_item(report, format);
        return;
    }

    let rows: Vec<PassRow> = report.passes.iter().map(PassRow::from).collect();
    output::print_list(&rows, format);

    let failures: Vec<FailureRow> = report
        .passes
        .iter()
        .flat_map(|summary| summary.failures.iter().map(FailureRow::from))
        .collect();
    if failures.is_empty() {
        output::print_success(&format!("{} commands accepted", report.emitted()));
    } else {
        output::print_warning(&format!("{} records could not be imported", failures.len()));
        output::print_list(&failures, format);
    }
}
