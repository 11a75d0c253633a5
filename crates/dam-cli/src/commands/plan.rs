//! Dry run of the folder pass.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_memory::MemoryDam;
use dam_service::ImportPipeline;

/// Arguments for the plan command
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: super::SourceArgs,
}

/// Planned folder display row
#[derive(Debug, Serialize, Tabled)]
struct PlanRow {
    position: usize,
    folder_id: String,
    label: String,
    parent_id: String,
}

/// Execute the plan command
pub async fn execute(
    args: &PlanArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let catalog = super::open_catalog(&args.source, config).await?;
    // Planning never emits; an empty DAM keeps the journal untouched.
    let pipeline = ImportPipeline::new(
        std::sync::Arc::new(MemoryDam::new()),
        catalog,
        config.import.clone(),
    );

    let (plan, failures) = pipeline.plan_folder_import().await?;

    let rows: Vec<PlanRow> = plan
        .commands
        .iter()
        .enumerate()
        .map(|(position, command)| PlanRow {
            position: position + 1,
            folder_id: command.folder_id.to_string(),
            label: command.label.to_string(),
            parent_id: command
                .parent_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    output::print_list(&rows, format);

    for id in &plan.orphaned {
        output::print_warning(&format!("Folder {id} references a missing parent, planned as root"));
    }
    for failure in &failures {
        output::print_warning(&format!(
            "Skipped source collection {}: {}",
            failure.source_id, failure.message
        ));
    }
    Ok(())
}
