//! Shared fixtures for dam-service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use dam_contracts::{Dam, SourceAsset, SourceFolder, SourceResource, SourceTag};
use dam_core::result::AppResult;
use dam_core::types::{AssetId, FolderId, Page, TagId};
use dam_entity::{Asset, AssetFilter, Command, Folder, Tag};
use dam_memory::{CatalogSnapshot, MemoryDam, SnapshotCatalog};

pub const TAG_SEA: &str = "6b1e8f0e-3a8e-4d7c-9d65-7e0c1f3d2a11";
pub const TAG_CITY: &str = "7c2f9a1f-4b9f-4e8d-8e76-8f1d2a4e3b22";
pub const FOLDER_TRIPS: &str = "0f4a1b52-8d0e-4a55-9b3b-2e9c7d1f6a00";
pub const FOLDER_ITALY: &str = "1a5b2c63-9e1f-4b66-8c4c-3f0d8e2a7b11";
pub const FOLDER_ROME: &str = "2b6c3d74-0f2a-4c77-9d5d-4a1e9f3b8c22";
pub const ASSET_BEACH: &str = "a8f5f167-f44f-4964-8e6f-6f4f5f1e2d3c";
pub const ASSET_REPORT: &str = "b9a6a278-a55a-4a75-9f7a-7a5a6a2f3e4d";
pub const ASSET_BROKEN: &str = "c0b7b389-b66b-4b86-8a8b-8b6b7b3a4f5e";

/// A DAM that records every command before delegating to a [`MemoryDam`].
#[derive(Debug, Default)]
pub struct RecordingDam {
    inner: MemoryDam,
    handled: Mutex<Vec<Command>>,
    /// Simulated facade latency per command.
    latency: Option<Duration>,
}

impl RecordingDam {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A recording DAM that takes `latency` to handle each command.
    pub fn slow(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency: Some(latency),
            ..Self::default()
        })
    }

    /// Every command passed to `handle`, accepted or not.
    pub fn handled(&self) -> Vec<Command> {
        self.handled.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.handled.lock().unwrap().clear();
    }

    pub async fn totals(&self) -> (usize, usize, usize) {
        self.inner.totals().await
    }
}

#[async_trait]
impl Dam for RecordingDam {
    async fn set_up(&self) -> AppResult<()> {
        self.inner.set_up().await
    }

    async fn handle(&self, command: Command) -> AppResult<()> {
        self.handled.lock().unwrap().push(command.clone());
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.inner.handle(command).await
    }

    async fn find_assets(&self, filter: &AssetFilter) -> AppResult<Page<Asset>> {
        self.inner.find_assets(filter).await
    }

    async fn count_assets(&self, filter: &AssetFilter) -> AppResult<u64> {
        self.inner.count_assets(filter).await
    }

    async fn find_asset_by_id(&self, id: AssetId) -> AppResult<Option<Asset>> {
        self.inner.find_asset_by_id(id).await
    }

    async fn find_folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        self.inner.find_folder_by_id(id).await
    }

    async fn find_child_folders(&self, id: FolderId) -> AppResult<Vec<Folder>> {
        self.inner.find_child_folders(id).await
    }

    async fn find_parent_folder(&self, id: FolderId) -> AppResult<Option<Folder>> {
        self.inner.find_parent_folder(id).await
    }

    async fn find_asset_folder(&self, id: AssetId) -> AppResult<Option<Folder>> {
        self.inner.find_asset_folder(id).await
    }

    async fn find_folders(&self) -> AppResult<Vec<Folder>> {
        self.inner.find_folders().await
    }

    async fn find_tag_by_id(&self, id: TagId) -> AppResult<Option<Tag>> {
        self.inner.find_tag_by_id(id).await
    }

    async fn find_tags(&self) -> AppResult<Vec<Tag>> {
        self.inner.find_tags().await
    }

    async fn find_tags_by_asset_id(&self, id: AssetId) -> AppResult<Vec<Tag>> {
        self.inner.find_tags_by_asset_id(id).await
    }
}

pub fn tag(id: &str, label: &str) -> SourceTag {
    SourceTag {
        id: id.to_string(),
        label: label.to_string(),
    }
}

pub fn folder(id: &str, title: &str, parent_id: Option<&str>) -> SourceFolder {
    SourceFolder {
        id: id.to_string(),
        title: title.to_string(),
        parent_id: parent_id.map(str::to_string),
    }
}

pub fn asset(id: &str, filename: &str, media_type: &str) -> SourceAsset {
    SourceAsset {
        id: id.to_string(),
        label: String::new(),
        caption: String::new(),
        resource: Some(SourceResource {
            sha1: id.replace('-', ""),
            filename: filename.to_string(),
            media_type: media_type.to_string(),
        }),
        width: None,
        height: None,
        tag_ids: Vec::new(),
        collection_ids: Vec::new(),
    }
}

/// A small catalog whose collections are listed children first.
pub fn sample_snapshot() -> CatalogSnapshot {
    let mut beach = asset(ASSET_BEACH, "beach.jpg", "image/jpeg");
    beach.label = "Beach".to_string();
    beach.width = Some(1024);
    beach.height = Some(768);
    beach.tag_ids = vec![TAG_SEA.to_string()];
    beach.collection_ids = vec![FOLDER_ROME.to_string(), FOLDER_TRIPS.to_string()];

    let mut report = asset(ASSET_REPORT, "report.pdf", "application/pdf");
    report.width = Some(595);
    report.height = Some(842);
    report.tag_ids = vec![TAG_CITY.to_string()];

    let mut broken = asset(ASSET_BROKEN, "missing.jpg", "image/jpeg");
    broken.resource = None;

    CatalogSnapshot {
        tags: vec![tag(TAG_SEA, "sea"), tag(TAG_CITY, "city")],
        folders: vec![
            folder(FOLDER_ROME, "Rome", Some(FOLDER_ITALY)),
            folder(FOLDER_ITALY, "Italy", Some(FOLDER_TRIPS)),
            folder(FOLDER_TRIPS, "Trips", None),
        ],
        assets: vec![beach, report, broken],
    }
}

pub fn sample_catalog() -> Arc<SnapshotCatalog> {
    Arc::new(SnapshotCatalog::new(sample_snapshot()))
}
