//! Read side of the media API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dam_contracts::Dam;
use dam_core::config::{QueryConfig, UploadConfig};
use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, Page, TagId};
use dam_entity::{Asset, AssetFilter, Folder, Tag};

use super::variables::required_str;
use crate::query::FilterComposer;

/// Client-facing API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    /// Largest accepted upload in bytes.
    pub upload_max_file_size: u64,
    /// Largest number of files per upload request.
    pub upload_max_file_upload_limit: u32,
    /// Server clock, for clients computing relative times.
    pub current_server_time: DateTime<Utc>,
}

/// Resolves asset, tag and collection queries.
pub struct QueryResolver {
    dam: Arc<dyn Dam>,
    composer: FilterComposer,
    upload: UploadConfig,
}

impl QueryResolver {
    /// Creates a query resolver.
    pub fn new(dam: Arc<dyn Dam>, query: QueryConfig, upload: UploadConfig) -> Self {
        Self {
            dam,
            composer: FilterComposer::new(query),
            upload,
        }
    }

    /// A page of assets matching the filter variables.
    pub async fn assets(&self, variables: &Map<String, Value>) -> AppResult<Page<Asset>> {
        let filter = self.composer.compose_map(variables)?;
        self.dam.find_assets(&filter).await
    }

    /// Number of assets matching the filter variables.
    pub async fn asset_count(&self, variables: &Map<String, Value>) -> AppResult<u64> {
        let filter = self.composer.compose_map(variables)?;
        self.dam.count_assets(&filter).await
    }

    pub async fn asset(&self, variables: &Map<String, Value>) -> AppResult<Option<Asset>> {
        let id = AssetId::parse(required_str(variables, "id")?)?;
        self.dam.find_asset_by_id(id).await
    }

    pub async fn tags(&self) -> AppResult<Vec<Tag>> {
        self.dam.find_tags().await
    }

    pub async fn tag(&self, variables: &Map<String, Value>) -> AppResult<Option<Tag>> {
        let id = TagId::parse(required_str(variables, "id")?)?;
        self.dam.find_tag_by_id(id).await
    }

    /// Every folder.
    pub async fn asset_collections(&self) -> AppResult<Vec<Folder>> {
        self.dam.find_folders().await
    }

    pub async fn asset_collection(&self, variables: &Map<String, Value>) -> AppResult<Option<Folder>> {
        let id = FolderId::parse(required_str(variables, "id")?)?;
        self.dam.find_folder_by_id(id).await
    }

    /// Upload limits and the current server time.
    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            upload_max_file_size: self.upload.max_file_size_bytes,
            upload_max_file_upload_limit: self.upload.max_file_upload_limit,
            current_server_time: Utc::now(),
        }
    }

    /// Direct children of a folder.
    pub async fn folder_children(&self, folder: &Folder) -> AppResult<Vec<Folder>> {
        self.dam.find_child_folders(folder.id).await
    }

    pub async fn folder_parent(&self, folder: &Folder) -> AppResult<Option<Folder>> {
        self.dam.find_parent_folder(folder.id).await
    }

    /// Number of assets directly inside a folder.
    pub async fn folder_asset_count(&self, folder: &Folder) -> AppResult<u64> {
        let filter = AssetFilter::create().with_folder_id(folder.id);
        self.dam.count_assets(&filter).await
    }

    pub async fn asset_tags(&self, asset: &Asset) -> AppResult<Vec<Tag>> {
        self.dam.find_tags_by_asset_id(asset.id).await
    }

    /// The asset's folder as a list of zero or one collections.
    pub async fn asset_collections_of(&self, asset: &Asset) -> AppResult<Vec<Folder>> {
        Ok(self
            .dam
            .find_asset_folder(asset.id)
            .await?
            .into_iter()
            .collect())
    }
}
