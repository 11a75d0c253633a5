//! Import of the legacy catalog into the DAM.

pub mod pipeline;
pub mod planner;
pub mod summary;

pub use pipeline::ImportPipeline;
pub use planner::{FolderDescriptor, FolderPlan, plan_folders};
pub use summary::{ImportFailure, ImportReport, PassSummary};
