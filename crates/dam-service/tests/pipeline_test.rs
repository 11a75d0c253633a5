//! Import pipeline against the in-memory DAM and a snapshot catalog.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dam_contracts::Dam;
use dam_core::config::ImportConfig;
use dam_core::error::ErrorKind;
use dam_core::traits::{ImportPass, ImportProgress};
use dam_core::types::{AssetId, FolderId, TagId};
use dam_entity::{AssetFilter, Command};
use dam_memory::{CatalogSnapshot, SnapshotCatalog};
use dam_service::ImportPipeline;
use tokio_util::sync::CancellationToken;

use helpers::*;

fn pipeline(dam: Arc<RecordingDam>, snapshot: CatalogSnapshot) -> ImportPipeline {
    ImportPipeline::new(
        dam,
        Arc::new(SnapshotCatalog::new(snapshot)),
        ImportConfig::default(),
    )
}

#[tokio::test]
async fn test_full_import_creates_everything() {
    let dam = RecordingDam::new();
    let report = pipeline(dam.clone(), sample_snapshot())
        .import_all()
        .await
        .unwrap();

    assert_eq!(report.passes.len(), 3);
    assert_eq!(report.emitted(), 2 + 3 + 2);
    assert_eq!(report.failures(), 0);
    assert_eq!(dam.totals().await, (2, 3, 2));

    let rome = FolderId::parse(FOLDER_ROME).unwrap();
    let parent = dam.find_parent_folder(rome).await.unwrap().unwrap();
    assert_eq!(parent.id, FolderId::parse(FOLDER_ITALY).unwrap());
}

#[tokio::test]
async fn test_asset_without_resource_is_not_handled() {
    let dam = RecordingDam::new();
    let summary = {
        let pipeline = pipeline(dam.clone(), sample_snapshot());
        pipeline.import_tags().await.unwrap();
        pipeline.import_folders().await.unwrap();
        dam.clear();
        pipeline.import_assets().await.unwrap()
    };

    assert_eq!(summary.total, 3);
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.skipped_missing_resource, 1);
    assert!(summary.is_clean());

    let broken = AssetId::parse(ASSET_BROKEN).unwrap();
    assert!(dam.handled().iter().all(|c| match c {
        Command::AddAsset(add) => add.asset_id != broken,
        _ => true,
    }));
    assert_eq!(dam.handled().len(), 2);
}

#[tokio::test]
async fn test_asset_attributes() {
    let dam = RecordingDam::new();
    pipeline(dam.clone(), sample_snapshot())
        .import_all()
        .await
        .unwrap();

    let beach = dam
        .find_asset_by_id(AssetId::parse(ASSET_BEACH).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(beach.label.as_str(), "Beach");
    assert_eq!((beach.width(), beach.height()), (1024, 768));
    assert_eq!(beach.folder_id, Some(FolderId::parse(FOLDER_ROME).unwrap()));
    assert!(beach.tag_ids.contains(&TagId::parse(TAG_SEA).unwrap()));

    let report = dam
        .find_asset_by_id(AssetId::parse(ASSET_REPORT).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.dimensions, None);
    assert_eq!(report.folder_id, None);
}

#[tokio::test]
async fn test_rerun_only_produces_duplicates() {
    let dam = RecordingDam::new();
    let pipeline = pipeline(dam.clone(), sample_snapshot());
    pipeline.import_all().await.unwrap();
    let totals = dam.totals().await;

    let report = pipeline.import_all().await.unwrap();
    assert_eq!(report.emitted(), 0);
    assert_eq!(report.duplicates(), 7);
    for summary in &report.passes {
        assert!(summary.failures.iter().all(|f| f.kind == ErrorKind::Conflict));
        assert_eq!(summary.failures.len() as u64, summary.duplicates);
    }
    assert_eq!(dam.totals().await, totals);
}

#[tokio::test]
async fn test_skip_duplicates_keeps_failures_empty() {
    let dam = RecordingDam::new();
    let config = ImportConfig {
        skip_duplicates: true,
        abort_on_rejection: true,
        ..ImportConfig::default()
    };
    let pipeline = ImportPipeline::new(dam.clone(), sample_catalog(), config);
    pipeline.import_all().await.unwrap();

    let report = pipeline.import_all().await.unwrap();
    assert_eq!(report.duplicates(), 7);
    assert_eq!(report.failures(), 0);
}

#[tokio::test]
async fn test_rejection_continues_by_default() {
    let mut snapshot = sample_snapshot();
    // References a tag that is not part of the catalog.
    snapshot.assets[1].tag_ids = vec!["9e4b1c3d-6a2f-4d8e-9b7c-1f0a2e3d4c5b".to_string()];

    let dam = RecordingDam::new();
    let report = pipeline(dam.clone(), snapshot).import_all().await.unwrap();

    let assets = report.pass(ImportPass::Assets).unwrap();
    assert_eq!(assets.emitted, 1);
    assert_eq!(assets.failures.len(), 1);
    assert_eq!(assets.failures[0].source_id, ASSET_REPORT);
    assert_eq!(assets.failures[0].kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_abort_on_rejection() {
    let mut snapshot = sample_snapshot();
    snapshot.assets[0].tag_ids = vec!["9e4b1c3d-6a2f-4d8e-9b7c-1f0a2e3d4c5b".to_string()];

    let dam = RecordingDam::new();
    let config = ImportConfig {
        abort_on_rejection: true,
        ..ImportConfig::default()
    };
    let pipeline = ImportPipeline::new(
        dam.clone(),
        Arc::new(SnapshotCatalog::new(snapshot)),
        config,
    );

    let err = pipeline.import_all().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert!(err.message.contains(ASSET_BEACH));
    // Tags and folders stay imported.
    assert_eq!(dam.totals().await, (0, 3, 2));
}

#[tokio::test]
async fn test_folder_cycle_aborts_pass_without_commands() {
    let mut snapshot = sample_snapshot();
    snapshot.folders[2].parent_id = Some(FOLDER_ROME.to_string());

    let dam = RecordingDam::new();
    let pipeline = pipeline(dam.clone(), snapshot);
    pipeline.import_tags().await.unwrap();
    dam.clear();

    let err = pipeline.import_folders().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Dependency);
    assert!(dam.handled().is_empty());
}

#[tokio::test]
async fn test_orphaned_folder_is_counted() {
    let mut snapshot = sample_snapshot();
    snapshot.folders.remove(1);

    let dam = RecordingDam::new();
    let summary = pipeline(dam.clone(), snapshot)
        .import_folders()
        .await
        .unwrap();
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.orphaned, 1);

    let rome = dam
        .find_folder_by_id(FolderId::parse(FOLDER_ROME).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(rome.is_root());
}

#[tokio::test]
async fn test_invalid_source_record_is_reported() {
    let mut snapshot = sample_snapshot();
    snapshot.tags.push(tag("not-a-uuid", "broken"));

    let dam = RecordingDam::new();
    let summary = pipeline(dam.clone(), snapshot).import_tags().await.unwrap();
    assert_eq!(summary.emitted, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].source_id, "not-a-uuid");
    assert_eq!(summary.failures[0].kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_cancelled_before_first_command() {
    let dam = RecordingDam::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = pipeline(dam.clone(), sample_snapshot())
        .with_cancellation(cancel)
        .import_all()
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Cancelled);
    assert!(dam.handled().is_empty());
}

#[derive(Default)]
struct CancelAfter {
    limit: u64,
    seen: AtomicU64,
    token: CancellationToken,
}

impl ImportProgress for CancelAfter {
    fn start(&self, _pass: ImportPass, _total: u64) {}

    fn advance(&self, _pass: ImportPass, _done: u64) {
        if self.seen.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
            self.token.cancel();
        }
    }

    fn finish(&self, _pass: ImportPass) {}
}

#[tokio::test]
async fn test_cancellation_between_commands() {
    let dam = RecordingDam::new();
    let progress = Arc::new(CancelAfter {
        limit: 1,
        ..CancelAfter::default()
    });

    let err = pipeline(dam.clone(), sample_snapshot())
        .with_cancellation(progress.token.clone())
        .with_progress(progress.clone())
        .import_all()
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Cancelled);
    assert_eq!(dam.handled().len(), 1);
    assert_eq!(dam.totals().await, (0, 0, 1));
}

#[tokio::test]
async fn test_imported_assets_are_searchable() {
    let dam = RecordingDam::new();
    pipeline(dam.clone(), sample_snapshot())
        .import_all()
        .await
        .unwrap();

    let images = AssetFilter::create().with_asset_type(dam_entity::AssetType::Image);
    assert_eq!(dam.count_assets(&images).await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pass_deadline_stops_between_commands() {
    // Each command takes 2s against a 3s budget per pass: both tags fit,
    // the third folder starts after the folder deadline.
    let dam = RecordingDam::slow(Duration::from_secs(2));
    let config = ImportConfig {
        pass_timeout_seconds: 3,
        ..ImportConfig::default()
    };
    let pipeline = ImportPipeline::new(dam.clone(), sample_catalog(), config);

    let err = pipeline.import_all().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(dam.handled().len(), 4);
    assert_eq!(dam.totals().await, (0, 2, 2));
}

#[tokio::test(start_paused = true)]
async fn test_zero_timeout_disables_deadline() {
    let dam = RecordingDam::slow(Duration::from_secs(3600));
    let report = pipeline(dam.clone(), sample_snapshot())
        .import_all()
        .await
        .unwrap();
    assert_eq!(report.emitted(), 7);
}

#[tokio::test]
async fn test_folder_batch_over_cap_is_rejected() {
    let dam = RecordingDam::new();
    let config = ImportConfig {
        max_batch_size: 2,
        ..ImportConfig::default()
    };
    let pipeline = ImportPipeline::new(dam.clone(), sample_catalog(), config);

    let err = pipeline.import_folders().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(dam.handled().is_empty());
    assert_eq!(dam.totals().await, (0, 0, 0));
}
