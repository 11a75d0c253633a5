//! In-memory DAM aggregate using a Tokio lock for serialized command application.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use dam_contracts::Dam;
use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, Page, TagId};
use dam_entity::{Asset, AssetFilter, Command, Folder, Tag};

use crate::journal::{Journal, JournalEntry};
use crate::state::DamState;

/// Reference DAM aggregate held in process memory.
///
/// Commands are applied one at a time under a write lock, so concurrent
/// callers observe a serializable history. When a journal is attached,
/// every accepted command is appended before the lock is released.
#[derive(Debug, Clone, Default)]
pub struct MemoryDam {
    /// Protected aggregate state.
    state: Arc<RwLock<DamState>>,
    /// Optional command journal.
    journal: Option<Arc<Journal>>,
}

impl MemoryDam {
    /// Creates an empty aggregate without persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an aggregate backed by a journal file, replaying existing entries.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let journal = Journal::new(path);
        let entries = journal.read_all().await?;

        let mut state = DamState::default();
        let mut skipped = 0usize;
        for entry in &entries {
            let at = state.tick(entry.recorded_at);
            if let Err(e) = state.apply(entry.command.clone(), at) {
                skipped += 1;
                warn!(
                    command = entry.command.name(),
                    target = %entry.command.target_id(),
                    error = %e,
                    "Journal entry no longer applies"
                );
            }
        }

        info!(
            path = %journal.path().display(),
            replayed = entries.len() - skipped,
            skipped,
            "DAM journal replayed"
        );

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            journal: Some(Arc::new(journal)),
        })
    }

    /// Number of assets, folders and tags currently held.
    pub async fn totals(&self) -> (usize, usize, usize) {
        let state = self.state.read().await;
        (state.assets.len(), state.folders.len(), state.tags.len())
    }
}

fn sorted_folders<'a>(folders: impl Iterator<Item = &'a Folder>) -> Vec<Folder> {
    let mut folders: Vec<Folder> = folders.cloned().collect();
    folders.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
    folders
}

fn sorted_tags<'a>(tags: impl Iterator<Item = &'a Tag>) -> Vec<Tag> {
    let mut tags: Vec<Tag> = tags.cloned().collect();
    tags.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
    tags
}

#[async_trait]
impl Dam for MemoryDam {
    async fn set_up(&self) -> AppResult<()> {
        if let Some(journal) = &self.journal {
            if let Some(parent) = journal.path().parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
        Ok(())
    }

    async fn handle(&self, command: Command) -> AppResult<()> {
        let name = command.name();
        let target = command.target_id();

        let mut state = self.state.write().await;
        state.validate(&command)?;
        let at = state.tick(Utc::now());

        // Only a journaled command becomes visible.
        if let Some(journal) = &self.journal {
            let entry = JournalEntry {
                recorded_at: at,
                command,
            };
            journal.append(&entry).await?;
            state.commit(entry.command, at);
        } else {
            state.commit(command, at);
        }

        debug!(command = name, target = %target, "Command applied");
        Ok(())
    }

    async fn find_assets(&self, filter: &AssetFilter) -> AppResult<Page<Asset>> {
        let state = self.state.read().await;
        let mut matching: Vec<&Asset> = state.assets.values().filter(|a| filter.matches(a)).collect();
        matching.sort_by(|a, b| filter.compare(a, b));

        let total = matching.len() as u64;
        let items = filter
            .pagination()
            .apply(matching.into_iter().cloned());
        Ok(Page::new(items, total, filter.pagination()))
    }

    async fn count_assets(&self, filter: &AssetFilter) -> AppResult<u64> {
        let state = self.state.read().await;
        Ok(state.assets.values().filter(|a| filter.matches(a)).count() as u64)
    }

    async fn find_asset_by_id(&self, id: AssetId) -> AppResult<Option<Asset>> {
        Ok(self.state.read().await.assets.get(&id).cloned())
    }

    async fn find_folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn find_child_folders(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        Ok(sorted_folders(
            state.folders.values().filter(|f| f.parent_id == Some(id)),
        ))
    }

    async fn find_parent_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .folders
            .get(&id)
            .and_then(|f| f.parent_id)
            .and_then(|parent_id| state.folders.get(&parent_id))
            .cloned())
    }

    async fn find_asset_folder(&self, id: AssetId) -> AppResult<Option<Folder>> {
        let state = self.state.read().await;
        Ok(state
            .assets
            .get(&id)
            .and_then(|a| a.folder_id)
            .and_then(|folder_id| state.folders.get(&folder_id))
            .cloned())
    }

    async fn find_folders(&self) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        Ok(sorted_folders(state.folders.values()))
    }

    async fn find_tag_by_id(&self, id: TagId) -> AppResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn find_tags(&self) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        Ok(sorted_tags(state.tags.values()))
    }

    async fn find_tags_by_asset_id(&self, id: AssetId) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        let Some(asset) = state.assets.get(&id) else {
            return Ok(Vec::new());
        };
        Ok(sorted_tags(
            asset.tag_ids.iter().filter_map(|tag_id| state.tags.get(tag_id)),
        ))
    }
}
