//! Aggregate state and command application for the in-memory DAM.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};

use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, TagId};
use dam_entity::command::{AddAsset, MoveFolder};
use dam_entity::{Asset, Command, Folder, Tag};

/// Internal state of the aggregate.
#[derive(Debug, Default)]
pub(crate) struct DamState {
    pub(crate) folders: HashMap<FolderId, Folder>,
    pub(crate) tags: HashMap<TagId, Tag>,
    pub(crate) assets: HashMap<AssetId, Asset>,
    /// Timestamp of the last applied command; modifications are strictly increasing.
    clock: Option<DateTime<Utc>>,
}

impl DamState {
    /// Returns a modification time strictly after the previous one.
    pub(crate) fn tick(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let at = match self.clock {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(at);
        at
    }

    /// Validates and applies a command. The state is unchanged on error.
    pub(crate) fn apply(&mut self, command: Command, at: DateTime<Utc>) -> AppResult<()> {
        self.validate(&command)?;
        self.commit(command, at);
        Ok(())
    }

    /// Checks a command against the current state without changing it.
    pub(crate) fn validate(&self, command: &Command) -> AppResult<()> {
        match command {
            Command::AddAsset(c) => {
                if self.assets.contains_key(&c.asset_id) {
                    return Err(AppError::conflict(format!(
                        "Asset {} already exists",
                        c.asset_id
                    )));
                }
                if let Some(folder_id) = c.folder_id {
                    self.require_folder(folder_id)?;
                }
                self.require_tags(&c.tag_ids)
            }
            Command::DeleteAsset(c) => self.require_asset(c.asset_id),
            Command::MoveAsset(c) => {
                self.require_folder(c.folder_id)?;
                self.require_asset(c.asset_id)
            }
            Command::SetAssetTags(c) => {
                self.require_tags(&c.tag_ids)?;
                self.require_asset(c.asset_id)
            }
            Command::AddTagToAsset(c) => {
                self.require_tag(c.tag_id)?;
                self.require_asset(c.asset_id)
            }
            Command::AddFolder(c) => {
                if self.folders.contains_key(&c.folder_id) {
                    return Err(AppError::conflict(format!(
                        "Folder {} already exists",
                        c.folder_id
                    )));
                }
                match c.parent_id {
                    Some(parent_id) => self.require_folder(parent_id),
                    None => Ok(()),
                }
            }
            Command::RenameFolder(c) => self.require_folder(c.folder_id),
            Command::MoveFolder(c) => self.check_move_folder(c),
            Command::DeleteFolder(c) => {
                self.require_folder(c.folder_id)?;
                if self
                    .folders
                    .values()
                    .any(|f| f.parent_id == Some(c.folder_id))
                {
                    return Err(AppError::conflict(format!(
                        "Folder {} still has child folders",
                        c.folder_id
                    )));
                }
                Ok(())
            }
            Command::AddTag(c) => {
                if self.tags.contains_key(&c.tag_id) {
                    return Err(AppError::conflict(format!("Tag {} already exists", c.tag_id)));
                }
                Ok(())
            }
            Command::RenameTag(c) => self.require_tag(c.tag_id),
            Command::DeleteTag(c) => self.require_tag(c.tag_id),
        }
    }

    /// Applies a command that already passed [`DamState::validate`].
    pub(crate) fn commit(&mut self, command: Command, at: DateTime<Utc>) {
        match command {
            Command::AddAsset(c) => self.add_asset(c, at),
            Command::DeleteAsset(c) => {
                self.assets.remove(&c.asset_id);
            }
            Command::MoveAsset(c) => {
                if let Some(asset) = self.assets.get_mut(&c.asset_id) {
                    asset.folder_id = Some(c.folder_id);
                    asset.last_modified = at;
                }
            }
            Command::SetAssetTags(c) => {
                if let Some(asset) = self.assets.get_mut(&c.asset_id) {
                    asset.tag_ids = c.tag_ids;
                    asset.last_modified = at;
                }
            }
            Command::AddTagToAsset(c) => {
                if let Some(asset) = self.assets.get_mut(&c.asset_id) {
                    if asset.tag_ids.insert(c.tag_id) {
                        asset.last_modified = at;
                    }
                }
            }
            Command::AddFolder(c) => {
                self.folders.insert(
                    c.folder_id,
                    Folder {
                        id: c.folder_id,
                        label: c.label,
                        parent_id: c.parent_id,
                    },
                );
            }
            Command::RenameFolder(c) => {
                if let Some(folder) = self.folders.get_mut(&c.folder_id) {
                    folder.label = c.new_label;
                }
            }
            Command::MoveFolder(c) => {
                if let Some(folder) = self.folders.get_mut(&c.folder_id) {
                    folder.parent_id = Some(c.new_parent_id);
                }
            }
            Command::DeleteFolder(c) => {
                self.folders.remove(&c.folder_id);
                for asset in self.assets.values_mut() {
                    if asset.folder_id == Some(c.folder_id) {
                        asset.folder_id = None;
                        asset.last_modified = at;
                    }
                }
            }
            Command::AddTag(c) => {
                self.tags.insert(
                    c.tag_id,
                    Tag {
                        id: c.tag_id,
                        label: c.label,
                    },
                );
            }
            Command::RenameTag(c) => {
                if let Some(tag) = self.tags.get_mut(&c.tag_id) {
                    tag.label = c.new_label;
                }
            }
            Command::DeleteTag(c) => {
                self.tags.remove(&c.tag_id);
                for asset in self.assets.values_mut() {
                    if asset.tag_ids.remove(&c.tag_id) {
                        asset.last_modified = at;
                    }
                }
            }
        }
    }

    fn require_folder(&self, id: FolderId) -> AppResult<()> {
        if self.folders.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Folder {id} does not exist")))
        }
    }

    fn require_tag(&self, id: TagId) -> AppResult<()> {
        if self.tags.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Tag {id} does not exist")))
        }
    }

    fn require_tags(&self, ids: &BTreeSet<TagId>) -> AppResult<()> {
        ids.iter().try_for_each(|id| self.require_tag(*id))
    }

    fn require_asset(&self, id: AssetId) -> AppResult<()> {
        if self.assets.contains_key(&id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Asset {id} does not exist")))
        }
    }

    fn check_move_folder(&self, c: &MoveFolder) -> AppResult<()> {
        self.require_folder(c.folder_id)?;
        self.require_folder(c.new_parent_id)?;

        // Walk up from the new parent; meeting the moved folder means a cycle.
        let mut cursor = Some(c.new_parent_id);
        while let Some(id) = cursor {
            if id == c.folder_id {
                return Err(AppError::validation(format!(
                    "Cannot move folder {} into itself or one of its descendants",
                    c.folder_id
                )));
            }
            cursor = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        Ok(())
    }

    fn add_asset(&mut self, c: AddAsset, at: DateTime<Utc>) {
        let asset = Asset {
            id: c.asset_id,
            media_type: c.media_type,
            resource_pointer: c.resource_pointer,
            filename: c.filename,
            metadata: c.metadata,
            label: c.label,
            caption: c.caption,
            dimensions: c.dimensions,
            folder_id: c.folder_id,
            tag_ids: c.tag_ids,
            last_modified: at,
        };
        self.assets.insert(asset.id, asset);
    }
}
