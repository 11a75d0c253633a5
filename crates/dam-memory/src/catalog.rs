//! Source catalog backed by a JSON export of the legacy media library.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use dam_contracts::{SourceAsset, SourceCatalog, SourceFolder, SourceTag};
use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;

/// Export of the legacy catalog: every tag, collection and asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Tags.
    #[serde(default)]
    pub tags: Vec<SourceTag>,
    /// Asset collections in iteration order.
    #[serde(default, alias = "collections")]
    pub folders: Vec<SourceFolder>,
    /// Assets.
    #[serde(default)]
    pub assets: Vec<SourceAsset>,
}

/// Read-only catalog over an in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCatalog {
    snapshot: CatalogSnapshot,
}

impl SnapshotCatalog {
    /// Wraps a snapshot.
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self { snapshot }
    }

    /// Loads a snapshot from a JSON file.
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read catalog snapshot {}", path.display()),
                e,
            )
        })?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&content)?;

        info!(
            path = %path.display(),
            tags = snapshot.tags.len(),
            folders = snapshot.folders.len(),
            assets = snapshot.assets.len(),
            "Catalog snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    /// The wrapped snapshot.
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl SourceCatalog for SnapshotCatalog {
    async fn count_tags(&self) -> AppResult<u64> {
        Ok(self.snapshot.tags.len() as u64)
    }

    async fn count_folders(&self) -> AppResult<u64> {
        Ok(self.snapshot.folders.len() as u64)
    }

    async fn count_assets(&self) -> AppResult<u64> {
        Ok(self.snapshot.assets.len() as u64)
    }

    async fn tags(&self) -> AppResult<Vec<SourceTag>> {
        Ok(self.snapshot.tags.clone())
    }

    async fn folders(&self) -> AppResult<Vec<SourceFolder>> {
        Ok(self.snapshot.folders.clone())
    }

    async fn assets(&self) -> AppResult<Vec<SourceAsset>> {
        Ok(self.snapshot.assets.clone())
    }
}
