//! Core type definitions used across the DAM bridge workspace.

pub mod id;
pub mod pagination;
pub mod sorting;

pub use id::{AssetId, FolderId, TagId};
pub use pagination::{Page, Pagination};
pub use sorting::{Ordering, OrderingDirection, OrderingField};
