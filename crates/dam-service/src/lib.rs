//! # dam-service
//!
//! Use cases of the DAM bridge. The import pipeline replays the legacy
//! catalog as commands, the filter composer turns request variables into
//! an [`AssetFilter`](dam_entity::AssetFilter), and the resolvers map
//! query/mutation variables onto the [`Dam`](dam_contracts::Dam) facade.
//!
//! Services follow constructor injection; collaborators are passed in as
//! `Arc<dyn Trait>` at construction time.

pub mod import;
pub mod query;
pub mod resolver;

pub use import::{
    FolderDescriptor, FolderPlan, ImportFailure, ImportPipeline, ImportReport, PassSummary,
    plan_folders,
};
pub use query::{FilterComposer, FilterParams};
pub use resolver::{MutationResolver, QueryResolver};
