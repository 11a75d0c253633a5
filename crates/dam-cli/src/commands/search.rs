//! Asset search over the imported DAM.

use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use dam_core::config::AppConfig;
use dam_core::error::AppError;
use dam_service::QueryResolver;

/// Arguments for the search command
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query variable as `key=value`, e.g. `assetType=image` or `limit=5`
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,
}

/// Asset display row
#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    id: String,
    label: String,
    #[tabled(rename = "type")]
    asset_type: String,
    filename: String,
    folder_id: String,
    last_modified: String,
}

/// Numbers, booleans and `null` keep their JSON type; anything else is a string.
fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let value = match serde_json::from_str::<Value>(value) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
        _ => Value::String(value.to_string()),
    };
    Ok((key.trim().to_string(), value))
}

/// Execute the search command
pub async fn execute(
    args: &SearchArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let dam = super::open_dam(config).await?;
    let resolver = QueryResolver::new(dam, config.query.clone(), config.upload.clone());

    let variables: Map<String, Value> = args.params.iter().cloned().collect();
    let page = resolver.assets(&variables).await?;

    let rows: Vec<AssetRow> = page
        .items
        .iter()
        .map(|asset| AssetRow {
            id: asset.id.to_string(),
            label: asset.display_name().to_string(),
            asset_type: asset.asset_type().to_string(),
            filename: asset.filename.to_string(),
            folder_id: asset
                .folder_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            last_modified: asset.last_modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();
    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        output::print_kv(
            "Showing",
            &format!(
                "{} of {} (offset {})",
                page.items.len(),
                page.total_items,
                page.pagination.offset()
            ),
        );
    }
    Ok(())
}
