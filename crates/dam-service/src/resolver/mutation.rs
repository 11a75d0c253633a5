//! Write side of the media API. Each mutation becomes commands on the
//! facade's single entry point.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use dam_contracts::Dam;
use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, TagId};
use dam_entity::asset::{
    AssetCaption, AssetLabel, AssetType, Dimensions, Filename, MediaType, Metadata,
    ResourcePointer,
};
use dam_entity::command::{
    AddAsset, AddFolder, AddTag, AddTagToAsset, DeleteAsset, DeleteFolder, DeleteTag, MoveAsset,
    MoveFolder, RenameFolder, RenameTag, SetAssetTags,
};
use dam_entity::{Asset, Folder, FolderLabel, Tag, TagLabel};

use super::variables::{optional_str, required_str, string_list};

/// A file the storage layer has already persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUpload {
    /// Content hash under which the bytes were stored.
    pub resource_pointer: String,
    /// Client file name.
    pub filename: String,
    /// Client media type.
    pub media_type: String,
    /// Pixel width, if the storage layer measured it.
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadOutcome {
    /// The asset was created.
    Added,
    /// The asset could not be created.
    Error,
}

/// Per-file result of an upload registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub success: bool,
    pub result: UploadOutcome,
    /// Id of the created asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<AssetId>,
}

/// Resolves asset, tag and collection mutations.
pub struct MutationResolver {
    dam: Arc<dyn Dam>,
}

impl MutationResolver {
    /// Creates a mutation resolver.
    pub fn new(dam: Arc<dyn Dam>) -> Self {
        Self { dam }
    }

    pub async fn delete_asset(&self, variables: &Map<String, Value>) -> AppResult<bool> {
        let asset_id = AssetId::parse(required_str(variables, "id")?)?;
        self.dam.handle(DeleteAsset { asset_id }.into()).await?;
        Ok(true)
    }

    /// Adds one tag to an asset.
    pub async fn tag_asset(&self, variables: &Map<String, Value>) -> AppResult<Asset> {
        let asset_id = AssetId::parse(required_str(variables, "id")?)?;
        let tag_id = TagId::parse(required_str(variables, "tagId")?)?;
        self.dam
            .handle(AddTagToAsset { asset_id, tag_id }.into())
            .await?;
        self.reload_asset(asset_id).await
    }

    /// Replaces the asset's tags.
    pub async fn set_asset_tags(&self, variables: &Map<String, Value>) -> AppResult<Asset> {
        let asset_id = AssetId::parse(required_str(variables, "id")?)?;
        let tag_ids = string_list(variables, "tagIds")?
            .into_iter()
            .map(TagId::parse)
            .collect::<AppResult<BTreeSet<_>>>()?;
        self.dam
            .handle(SetAssetTags { asset_id, tag_ids }.into())
            .await?;
        self.reload_asset(asset_id).await
    }

    /// Moves the asset into the first listed collection; an asset has one folder.
    pub async fn set_asset_collections(&self, variables: &Map<String, Value>) -> AppResult<Asset> {
        let asset_id = AssetId::parse(required_str(variables, "id")?)?;
        let first = string_list(variables, "assetCollectionIds")?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::validation("assetCollectionIds must not be empty"))?;
        let folder_id = FolderId::parse(first)?;
        self.dam
            .handle(MoveAsset { asset_id, folder_id }.into())
            .await?;
        self.reload_asset(asset_id).await
    }

    pub async fn create_asset_collection(&self, variables: &Map<String, Value>) -> AppResult<Folder> {
        let folder_id = FolderId::new();
        let label = FolderLabel::new(required_str(variables, "title")?)?;
        let parent_id = optional_str(variables, "parent")?
            .map(FolderId::parse)
            .transpose()?;
        self.dam
            .handle(
                AddFolder {
                    folder_id,
                    label,
                    parent_id,
                }
                .into(),
            )
            .await?;
        info!(folder_id = %folder_id, "Asset collection created");
        self.reload_folder(folder_id).await
    }

    /// Renames and/or moves a folder. The rename is applied first.
    pub async fn update_asset_collection(&self, variables: &Map<String, Value>) -> AppResult<Folder> {
        let folder_id = FolderId::parse(required_str(variables, "id")?)?;
        let new_label = optional_str(variables, "title")?
            .map(FolderLabel::new)
            .transpose()?;
        let new_parent_id = optional_str(variables, "parent")?
            .map(FolderId::parse)
            .transpose()?;

        if let Some(new_label) = new_label {
            self.dam
                .handle(RenameFolder { folder_id, new_label }.into())
                .await?;
        }
        if let Some(new_parent_id) = new_parent_id {
            self.dam
                .handle(
                    MoveFolder {
                        folder_id,
                        new_parent_id,
                    }
                    .into(),
                )
                .await?;
        }
        self.reload_folder(folder_id).await
    }

    pub async fn delete_asset_collection(&self, variables: &Map<String, Value>) -> AppResult<bool> {
        let folder_id = FolderId::parse(required_str(variables, "id")?)?;
        self.dam.handle(DeleteFolder { folder_id }.into()).await?;
        Ok(true)
    }

    pub async fn create_tag(&self, variables: &Map<String, Value>) -> AppResult<Tag> {
        let tag_id = TagId::new();
        let label = TagLabel::new(required_str(variables, "label")?)?;
        self.dam.handle(AddTag { tag_id, label }.into()).await?;
        self.reload_tag(tag_id).await
    }

    pub async fn update_tag(&self, variables: &Map<String, Value>) -> AppResult<Tag> {
        let tag_id = TagId::parse(required_str(variables, "id")?)?;
        let new_label = TagLabel::new(required_str(variables, "label")?)?;
        self.dam
            .handle(RenameTag { tag_id, new_label }.into())
            .await?;
        self.reload_tag(tag_id).await
    }

    pub async fn delete_tag(&self, variables: &Map<String, Value>) -> AppResult<bool> {
        let tag_id = TagId::parse(required_str(variables, "id")?)?;
        self.dam.handle(DeleteTag { tag_id }.into()).await?;
        Ok(true)
    }

    /// Creates an asset for an already stored file, labelled with its file
    /// name. `tagId` and `assetCollectionId` give the initial tag and folder.
    ///
    /// Malformed variables are errors; a file the DAM does not accept is
    /// reported in the result.
    pub async fn register_upload(
        &self,
        upload: &StoredUpload,
        variables: &Map<String, Value>,
    ) -> AppResult<UploadResult> {
        let folder_id = optional_str(variables, "assetCollectionId")?
            .map(FolderId::parse)
            .transpose()?;
        let tag_id = optional_str(variables, "tagId")?
            .map(TagId::parse)
            .transpose()?;
        Ok(self.register(upload, folder_id, tag_id).await)
    }

    /// Registers several stored files with the same tag and folder. One
    /// failing file does not stop the others.
    pub async fn register_uploads(
        &self,
        uploads: &[StoredUpload],
        variables: &Map<String, Value>,
    ) -> AppResult<Vec<UploadResult>> {
        let folder_id = optional_str(variables, "assetCollectionId")?
            .map(FolderId::parse)
            .transpose()?;
        let tag_id = optional_str(variables, "tagId")?
            .map(TagId::parse)
            .transpose()?;

        let mut results = Vec::with_capacity(uploads.len());
        for upload in uploads {
            results.push(self.register(upload, folder_id, tag_id).await);
        }
        Ok(results)
    }

    async fn register(
        &self,
        upload: &StoredUpload,
        folder_id: Option<FolderId>,
        tag_id: Option<TagId>,
    ) -> UploadResult {
        let asset_id = AssetId::new();
        let outcome = match upload_command(asset_id, upload, folder_id, tag_id) {
            Ok(command) => self.dam.handle(command.into()).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                info!(asset_id = %asset_id, filename = %upload.filename, "Upload registered");
                UploadResult {
                    filename: upload.filename.clone(),
                    success: true,
                    result: UploadOutcome::Added,
                    asset_id: Some(asset_id),
                }
            }
            Err(e) => {
                warn!(filename = %upload.filename, error = %e, "Upload registration failed");
                UploadResult {
                    filename: upload.filename.clone(),
                    success: false,
                    result: UploadOutcome::Error,
                    asset_id: None,
                }
            }
        }
    }

    async fn reload_asset(&self, id: AssetId) -> AppResult<Asset> {
        self.dam
            .find_asset_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Asset {id} does not exist")))
    }

    async fn reload_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.dam
            .find_folder_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} does not exist")))
    }

    async fn reload_tag(&self, id: TagId) -> AppResult<Tag> {
        self.dam
            .find_tag_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} does not exist")))
    }
}

fn upload_command(
    asset_id: AssetId,
    upload: &StoredUpload,
    folder_id: Option<FolderId>,
    tag_id: Option<TagId>,
) -> AppResult<AddAsset> {
    let media_type = MediaType::new(&upload.media_type)?;
    let dimensions = if AssetType::from_media_type(&media_type).supports_dimensions() {
        Dimensions::from_source(upload.width, upload.height)
    } else {
        None
    };
    let filename = Filename::new(upload.filename.as_str())?;

    Ok(AddAsset {
        asset_id,
        media_type,
        resource_pointer: ResourcePointer::new(upload.resource_pointer.as_str())?,
        label: AssetLabel(filename.as_str().to_string()),
        filename,
        metadata: Metadata::none(),
        caption: AssetCaption::default(),
        dimensions,
        folder_id,
        tag_ids: tag_id.into_iter().collect(),
    })
}
