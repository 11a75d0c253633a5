//! Asset filter spec used by catalog search and counts.

pub mod spec;

pub use spec::{AssetFilter, SearchTerm};
