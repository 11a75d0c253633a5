//! Asset commands.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use dam_core::types::{AssetId, FolderId, TagId};

use crate::asset::{
    AssetCaption, AssetLabel, Dimensions, Filename, MediaType, Metadata, ResourcePointer,
};

/// Create an asset with its initial folder and tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAsset {
    /// Id of the new asset.
    pub asset_id: AssetId,
    /// Media type of the resource.
    pub media_type: MediaType,
    /// Pointer to the stored resource.
    pub resource_pointer: ResourcePointer,
    /// Original file name.
    pub filename: Filename,
    /// Opaque metadata.
    pub metadata: Metadata,
    /// Display label.
    pub label: AssetLabel,
    /// Caption.
    pub caption: AssetCaption,
    /// Dimensions for visual media.
    pub dimensions: Option<Dimensions>,
    /// Containing folder.
    pub folder_id: Option<FolderId>,
    /// Initial tags.
    pub tag_ids: BTreeSet<TagId>,
}

/// Remove an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAsset {
    /// Asset to remove.
    pub asset_id: AssetId,
}

/// Put an asset into a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAsset {
    /// Asset to move.
    pub asset_id: AssetId,
    /// Target folder.
    pub folder_id: FolderId,
}

/// Replace the complete tag set of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAssetTags {
    /// Asset to retag.
    pub asset_id: AssetId,
    /// New tag set.
    pub tag_ids: BTreeSet<TagId>,
}

/// Add one tag to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTagToAsset {
    /// Asset to tag.
    pub asset_id: AssetId,
    /// Tag to add.
    pub tag_id: TagId,
}
