//! # dam-contracts
//!
//! Narrow contracts for the external collaborators of the bridge:
//!
//! - [`Dam`]: the command/query facade of the DAM aggregate.
//! - [`SourceCatalog`]: read-only access to the pre-existing media catalog.
//!
//! Implementations live in `dam-memory` (in-process) and `dam-database`
//! (PostgreSQL source catalog).

pub mod dam;
pub mod source;

pub use dam::Dam;
pub use source::{SourceAsset, SourceCatalog, SourceFolder, SourceResource, SourceTag};
