//! Outcome reporting for import passes.

use serde::{Deserialize, Serialize};

use dam_core::error::{AppError, ErrorKind};
use dam_core::traits::ImportPass;

/// A source record that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    /// Id of the record in the source catalog.
    pub source_id: String,
    /// Error category.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

impl ImportFailure {
    /// Attach a source id to an error.
    pub fn new(source_id: impl Into<String>, error: &AppError) -> Self {
        Self {
            source_id: source_id.into(),
            kind: error.kind,
            message: error.message.clone(),
        }
    }
}

/// Counters of one import pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// The pass.
    pub pass: ImportPass,
    /// Source records seen.
    pub total: u64,
    /// Commands accepted by the DAM.
    pub emitted: u64,
    /// Commands rejected because the entity already exists.
    pub duplicates: u64,
    /// Assets skipped because they have no binary resource.
    pub skipped_missing_resource: u64,
    /// Folders imported as roots because their parent was not in the source.
    pub orphaned: u64,
    /// Records that failed, with their source id.
    pub failures: Vec<ImportFailure>,
}

impl PassSummary {
    /// An empty summary for a pass.
    pub fn new(pass: ImportPass) -> Self {
        Self {
            pass,
            total: 0,
            emitted: 0,
            duplicates: 0,
            skipped_missing_resource: 0,
            orphaned: 0,
            failures: Vec::new(),
        }
    }

    /// Whether no record failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Summaries of a full import, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// One summary per pass that ran.
    pub passes: Vec<PassSummary>,
}

impl ImportReport {
    /// Summary of a pass, if it ran.
    pub fn pass(&self, pass: ImportPass) -> Option<&PassSummary> {
        self.passes.iter().find(|summary| summary.pass == pass)
    }

    /// Total accepted commands across passes.
    pub fn emitted(&self) -> u64 {
        self.passes.iter().map(|summary| summary.emitted).sum()
    }

    /// Total duplicates across passes.
    pub fn duplicates(&self) -> u64 {
        self.passes.iter().map(|summary| summary.duplicates).sum()
    }

    /// Total failures across passes.
    pub fn failures(&self) -> usize {
        self.passes.iter().map(|summary| summary.failures.len()).sum()
    }
}
