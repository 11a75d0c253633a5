//! Read-only view of the pre-existing media catalog.
//!
//! Source records carry the catalog's raw values (string ids, untrusted
//! labels). Converting them into DAM value objects is the importer's job,
//! so one malformed record fails alone instead of failing the read.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use dam_core::result::AppResult;

/// A tag in the source catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTag {
    /// Persistence identifier.
    pub id: String,
    /// Tag label.
    pub label: String,
}

/// An asset collection in the source catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFolder {
    /// Persistence identifier.
    pub id: String,
    /// Collection title.
    pub title: String,
    /// Parent collection identifier, if the collection is nested.
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// The stored binary behind a source asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceResource {
    /// SHA-1 of the content.
    pub sha1: String,
    /// Original file name.
    pub filename: String,
    /// Media type of the content.
    pub media_type: String,
}

/// An asset in the source catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAsset {
    /// Persistence identifier.
    pub id: String,
    /// Asset title/label.
    #[serde(default)]
    pub label: String,
    /// Caption.
    #[serde(default)]
    pub caption: String,
    /// Stored resource. Assets without one are skipped on import.
    #[serde(default)]
    pub resource: Option<SourceResource>,
    /// Width in pixels as recorded by the catalog.
    #[serde(default)]
    pub width: Option<i64>,
    /// Height in pixels as recorded by the catalog.
    #[serde(default)]
    pub height: Option<i64>,
    /// Tag identifiers.
    #[serde(default)]
    pub tag_ids: Vec<String>,
    /// Collection identifiers in the catalog's own ordering.
    #[serde(default)]
    pub collection_ids: Vec<String>,
}

/// Read-only, finite and countable access to the source catalog.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Number of tags.
    async fn count_tags(&self) -> AppResult<u64>;

    /// Number of asset collections.
    async fn count_folders(&self) -> AppResult<u64>;

    /// Number of assets.
    async fn count_assets(&self) -> AppResult<u64>;

    /// All tags.
    async fn tags(&self) -> AppResult<Vec<SourceTag>>;

    /// All asset collections, in the catalog's iteration order.
    async fn folders(&self) -> AppResult<Vec<SourceFolder>>;

    /// All assets.
    async fn assets(&self) -> AppResult<Vec<SourceAsset>>;
}
