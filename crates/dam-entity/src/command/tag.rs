//! Tag commands.

use serde::{Deserialize, Serialize};

use dam_core::types::TagId;

use crate::tag::TagLabel;

/// Create a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTag {
    /// Id of the new tag.
    pub tag_id: TagId,
    /// Label of the new tag.
    pub label: TagLabel,
}

/// Change a tag's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameTag {
    /// Tag to rename.
    pub tag_id: TagId,
    /// New label.
    pub new_label: TagLabel,
}

/// Remove a tag (and its assignments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTag {
    /// Tag to remove.
    pub tag_id: TagId,
}
