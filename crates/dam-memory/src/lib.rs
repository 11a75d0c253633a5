//! # dam-memory
//!
//! In-process implementations of the bridge contracts:
//!
//! - [`MemoryDam`]: a reference DAM aggregate that enforces the command
//!   invariants (unique ids, existing parents and references) and can
//!   persist accepted commands to a JSON-lines journal.
//! - [`SnapshotCatalog`]: a source catalog backed by a JSON export.

pub mod catalog;
pub mod dam;
pub mod journal;
mod state;

pub use catalog::{CatalogSnapshot, SnapshotCatalog};
pub use dam::MemoryDam;
pub use journal::{Journal, JournalEntry};
