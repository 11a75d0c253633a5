//! Folder read model.

use serde::{Deserialize, Serialize};

use dam_core::types::FolderId;

use crate::label::define_label;

define_label!(
    /// Display label of a folder.
    FolderLabel, "Folder label"
);

/// A folder in the asset hierarchy. Folders form a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder label.
    pub label: FolderLabel,
    /// Parent folder ID (None for root folders).
    pub parent_id: Option<FolderId>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
