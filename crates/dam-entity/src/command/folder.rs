//! Folder commands.

use serde::{Deserialize, Serialize};

use dam_core::types::FolderId;

use crate::folder::FolderLabel;

/// Create a folder. The parent, if set, must already exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddFolder {
    /// Id of the new folder.
    pub folder_id: FolderId,
    /// Label of the new folder.
    pub label: FolderLabel,
    /// Parent folder, None for a root folder.
    pub parent_id: Option<FolderId>,
}

/// Change a folder's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFolder {
    /// Folder to rename.
    pub folder_id: FolderId,
    /// New label.
    pub new_label: FolderLabel,
}

/// Move a folder below another folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveFolder {
    /// Folder to move.
    pub folder_id: FolderId,
    /// New parent folder.
    pub new_parent_id: FolderId,
}

/// Remove a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFolder {
    /// Folder to remove.
    pub folder_id: FolderId,
}
