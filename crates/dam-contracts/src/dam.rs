//! Command/query facade of the DAM aggregate.

use async_trait::async_trait;

use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, Page, TagId};
use dam_entity::{Asset, AssetFilter, Command, Folder, Tag};

/// The DAM facade: one write entry point plus read-only queries.
///
/// `handle` rejects invalid commands with an `AppError` whose kind tells
/// the caller what went wrong: `Conflict` for an already existing id,
/// `NotFound` for a missing referenced entity, `Validation` for a command
/// that would break an invariant of the aggregate.
#[async_trait]
pub trait Dam: Send + Sync + 'static {
    /// Prepare the backing store. Safe to call repeatedly.
    async fn set_up(&self) -> AppResult<()>;

    /// Apply a command.
    async fn handle(&self, command: Command) -> AppResult<()>;

    /// Find one page of assets matching the filter.
    async fn find_assets(&self, filter: &AssetFilter) -> AppResult<Page<Asset>>;

    /// Count all assets matching the filter, ignoring pagination.
    async fn count_assets(&self, filter: &AssetFilter) -> AppResult<u64>;

    /// Find an asset by id.
    async fn find_asset_by_id(&self, id: AssetId) -> AppResult<Option<Asset>>;

    /// Find a folder by id.
    async fn find_folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of a folder.
    async fn find_child_folders(&self, id: FolderId) -> AppResult<Vec<Folder>>;

    /// Parent of a folder, None for root folders.
    async fn find_parent_folder(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// The folder containing an asset, if any.
    async fn find_asset_folder(&self, id: AssetId) -> AppResult<Option<Folder>>;

    /// All folders.
    async fn find_folders(&self) -> AppResult<Vec<Folder>>;

    /// Find a tag by id.
    async fn find_tag_by_id(&self, id: TagId) -> AppResult<Option<Tag>>;

    /// All tags.
    async fn find_tags(&self) -> AppResult<Vec<Tag>>;

    /// Tags assigned to an asset.
    async fn find_tags_by_asset_id(&self, id: AssetId) -> AppResult<Vec<Tag>>;
}
