//! Commands accepted by the DAM's single write entry point.
//!
//! The set is closed: every write goes through [`Command`] and is
//! dispatched by one `handle` method on the facade.

pub mod asset;
pub mod folder;
pub mod tag;

use serde::{Deserialize, Serialize};

pub use asset::{AddAsset, AddTagToAsset, DeleteAsset, MoveAsset, SetAssetTags};
pub use folder::{AddFolder, DeleteFolder, MoveFolder, RenameFolder};
pub use tag::{AddTag, DeleteTag, RenameTag};

/// Union of all DAM commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    /// Create an asset.
    AddAsset(AddAsset),
    /// Remove an asset.
    DeleteAsset(DeleteAsset),
    /// Put an asset into a folder.
    MoveAsset(MoveAsset),
    /// Replace the tag set of an asset.
    SetAssetTags(SetAssetTags),
    /// Add a single tag to an asset.
    AddTagToAsset(AddTagToAsset),
    /// Create a folder.
    AddFolder(AddFolder),
    /// Change a folder's label.
    RenameFolder(RenameFolder),
    /// Change a folder's parent.
    MoveFolder(MoveFolder),
    /// Remove a folder.
    DeleteFolder(DeleteFolder),
    /// Create a tag.
    AddTag(AddTag),
    /// Change a tag's label.
    RenameTag(RenameTag),
    /// Remove a tag.
    DeleteTag(DeleteTag),
}

impl Command {
    /// Short command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddAsset(_) => "AddAsset",
            Self::DeleteAsset(_) => "DeleteAsset",
            Self::MoveAsset(_) => "MoveAsset",
            Self::SetAssetTags(_) => "SetAssetTags",
            Self::AddTagToAsset(_) => "AddTagToAsset",
            Self::AddFolder(_) => "AddFolder",
            Self::RenameFolder(_) => "RenameFolder",
            Self::MoveFolder(_) => "MoveFolder",
            Self::DeleteFolder(_) => "DeleteFolder",
            Self::AddTag(_) => "AddTag",
            Self::RenameTag(_) => "RenameTag",
            Self::DeleteTag(_) => "DeleteTag",
        }
    }

    /// The id of the entity the command targets, as a string.
    pub fn target_id(&self) -> String {
        match self {
            Self::AddAsset(c) => c.asset_id.to_string(),
            Self::DeleteAsset(c) => c.asset_id.to_string(),
            Self::MoveAsset(c) => c.asset_id.to_string(),
            Self::SetAssetTags(c) => c.asset_id.to_string(),
            Self::AddTagToAsset(c) => c.asset_id.to_string(),
            Self::AddFolder(c) => c.folder_id.to_string(),
            Self::RenameFolder(c) => c.folder_id.to_string(),
            Self::MoveFolder(c) => c.folder_id.to_string(),
            Self::DeleteFolder(c) => c.folder_id.to_string(),
            Self::AddTag(c) => c.tag_id.to_string(),
            Self::RenameTag(c) => c.tag_id.to_string(),
            Self::DeleteTag(c) => c.tag_id.to_string(),
        }
    }
}

macro_rules! impl_into_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(command: $variant) -> Self {
                    Self::$variant(command)
                }
            }
        )*
    };
}

impl_into_command!(
    AddAsset,
    DeleteAsset,
    MoveAsset,
    SetAssetTags,
    AddTagToAsset,
    AddFolder,
    RenameFolder,
    MoveFolder,
    DeleteFolder,
    AddTag,
    RenameTag,
    DeleteTag,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagLabel;
    use dam_core::types::TagId;

    #[test]
    fn test_command_is_tagged_by_type() {
        let tag_id = TagId::new();
        let command: Command = AddTag {
            tag_id,
            label: TagLabel::new("nature").expect("valid"),
        }
        .into();

        let json = serde_json::to_value(&command).expect("serialize");
        assert_eq!(json["type"], "AddTag");
        assert_eq!(json["payload"]["label"], "nature");
        assert_eq!(command.target_id(), tag_id.to_string());
    }
}
