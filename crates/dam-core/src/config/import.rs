//! Import pipeline configuration.

use serde::{Deserialize, Serialize};

/// Settings governing the bulk import passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Upper bound on the number of folder descriptors the planner buffers.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Time budget per import pass in seconds (0 disables the deadline).
    #[serde(default)]
    pub pass_timeout_seconds: u64,
    /// Abort a pass at the first facade rejection instead of continuing.
    #[serde(default)]
    pub abort_on_rejection: bool,
    /// Count duplicate-id rejections without listing them as failures.
    #[serde(default)]
    pub skip_duplicates: bool,
    /// Emit a progress log line every N processed records.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Command journal written by the local reference DAM.
    #[serde(default = "default_journal_path")]
    pub journal_path: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            pass_timeout_seconds: 0,
            abort_on_rejection: false,
            skip_duplicates: false,
            progress_interval: default_progress_interval(),
            journal_path: default_journal_path(),
        }
    }
}

fn default_max_batch_size() -> usize {
    100_000
}

fn default_progress_interval() -> u64 {
    100
}

fn default_journal_path() -> String {
    "data/dam-journal.jsonl".to_string()
}
