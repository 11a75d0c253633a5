//! # dam-entity
//!
//! Domain models of the DAM aggregate as seen by the bridge: read models
//! (folders, tags, assets), validated value objects, the closed set of
//! commands accepted by the single write entry point, and the immutable
//! asset filter spec used by catalog search.

pub mod asset;
pub mod command;
pub mod filter;
pub mod folder;
mod label;
pub mod tag;

pub use asset::{Asset, AssetType};
pub use command::Command;
pub use filter::{AssetFilter, SearchTerm};
pub use folder::{Folder, FolderLabel};
pub use tag::{Tag, TagLabel};
