//! Asset read model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dam_core::types::{AssetId, FolderId, TagId};

use super::media::{AssetType, MediaType};
use super::value::{AssetCaption, AssetLabel, Dimensions, Filename, Metadata, ResourcePointer};

/// An asset managed by the DAM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Media type of the stored resource.
    pub media_type: MediaType,
    /// Reference to the binary payload in external storage.
    pub resource_pointer: ResourcePointer,
    /// Original file name.
    pub filename: Filename,
    /// Opaque metadata.
    pub metadata: Metadata,
    /// Display label.
    pub label: AssetLabel,
    /// Caption.
    pub caption: AssetCaption,
    /// Width/height for visual media.
    pub dimensions: Option<Dimensions>,
    /// The single containing folder, if any.
    pub folder_id: Option<FolderId>,
    /// Assigned tags.
    pub tag_ids: BTreeSet<TagId>,
    /// When the asset was last changed.
    pub last_modified: DateTime<Utc>,
}

impl Asset {
    /// Coarse asset type derived from the media type.
    pub fn asset_type(&self) -> AssetType {
        AssetType::from_media_type(&self.media_type)
    }

    /// The name used for ordering and display: label, falling back to filename.
    pub fn display_name(&self) -> &str {
        if self.label.as_str().is_empty() {
            self.filename.as_str()
        } else {
            self.label.as_str()
        }
    }

    /// Width in pixels, 0 when unknown.
    pub fn width(&self) -> u32 {
        self.dimensions.map(|d| d.width).unwrap_or(0)
    }

    /// Height in pixels, 0 when unknown.
    pub fn height(&self) -> u32 {
        self.dimensions.map(|d| d.height).unwrap_or(0)
    }
}
