//! DAM setup command.

use dam_contracts::Dam;
use dam_core::config::AppConfig;
use dam_core::error::AppError;

use crate::output;

/// Execute the setup command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let dam = super::open_dam(config).await?;
    dam.set_up().await?;

    let (assets, folders, tags) = dam.totals().await;
    output::print_success("DAM is set up");
    output::print_kv("Journal", &config.import.journal_path);
    output::print_kv("Assets", &assets.to_string());
    output::print_kv("Folders", &folders.to_string());
    output::print_kv("Tags", &tags.to_string());
    Ok(())
}
