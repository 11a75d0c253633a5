//! Replays the legacy catalog into the DAM as commands.
//!
//! Passes run tags, then folders, then assets: assets reference both. Every
//! command reuses the source id as its target id, so a second run is
//! rejected entity by entity as duplicates instead of creating copies.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use dam_contracts::{Dam, SourceAsset, SourceCatalog, SourceFolder, SourceTag};
use dam_core::config::ImportConfig;
use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_core::traits::{ImportPass, ImportProgress, NoopProgress};
use dam_core::types::{AssetId, FolderId, TagId};
use dam_entity::asset::{
    AssetCaption, AssetLabel, AssetType, Dimensions, Filename, MediaType, Metadata,
    ResourcePointer,
};
use dam_entity::command::{AddAsset, AddTag};
use dam_entity::{Command, FolderLabel, TagLabel};

use super::planner::{FolderDescriptor, FolderPlan, plan_folders};
use super::summary::{ImportFailure, ImportReport, PassSummary};

/// Drives the import passes against a DAM.
pub struct ImportPipeline {
    dam: Arc<dyn Dam>,
    catalog: Arc<dyn SourceCatalog>,
    config: ImportConfig,
    progress: Arc<dyn ImportProgress>,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ImportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportPipeline")
            .field("config", &self.config)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl ImportPipeline {
    /// Creates a pipeline without progress reporting.
    pub fn new(dam: Arc<dyn Dam>, catalog: Arc<dyn SourceCatalog>, config: ImportConfig) -> Self {
        Self {
            dam,
            catalog,
            config,
            progress: Arc::new(NoopProgress),
            cancel: CancellationToken::new(),
        }
    }

    /// Reports progress to the given sink.
    pub fn with_progress(mut self, progress: Arc<dyn ImportProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Stops between commands once the token is cancelled.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The token that cancels this pipeline.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs all passes in dependency order. A pass that fails stops the
    /// import; commands of earlier passes stay in effect.
    pub async fn import_all(&self) -> AppResult<ImportReport> {
        let mut report = ImportReport::default();
        report.passes.push(self.import_tags().await?);
        report.passes.push(self.import_folders().await?);
        report.passes.push(self.import_assets().await?);

        info!(
            emitted = report.emitted(),
            duplicates = report.duplicates(),
            failures = report.failures(),
            "Import finished"
        );
        Ok(report)
    }

    /// Imports every source tag.
    #[instrument(skip(self))]
    pub async fn import_tags(&self) -> AppResult<PassSummary> {
        let tags = self.catalog.tags().await?;
        let mut run = PassRun::start(self, ImportPass::Tags, tags.len() as u64);

        let result = self.run_tags(&mut run, tags).await;
        run.finish(result)
    }

    /// Imports every source collection as a folder, parents first.
    #[instrument(skip(self))]
    pub async fn import_folders(&self) -> AppResult<PassSummary> {
        let folders = self.catalog.folders().await?;
        let mut run = PassRun::start(self, ImportPass::Folders, folders.len() as u64);

        let result = self.run_folders(&mut run, folders).await;
        run.finish(result)
    }

    /// Imports every source asset that has a binary resource.
    #[instrument(skip(self))]
    pub async fn import_assets(&self) -> AppResult<PassSummary> {
        let assets = self.catalog.assets().await?;
        let mut run = PassRun::start(self, ImportPass::Assets, assets.len() as u64);

        let result = self.run_assets(&mut run, assets).await;
        run.finish(result)
    }

    /// Plans the folder pass without emitting anything. Records that cannot
    /// be turned into descriptors are returned as failures.
    pub async fn plan_folder_import(&self) -> AppResult<(FolderPlan, Vec<ImportFailure>)> {
        let folders = self.catalog.folders().await?;
        let mut failures = Vec::new();
        let descriptors = folders
            .iter()
            .filter_map(|source| match folder_descriptor(source) {
                Ok(descriptor) => Some(descriptor),
                Err(e) => {
                    failures.push(ImportFailure::new(&source.id, &e));
                    None
                }
            })
            .collect();
        let plan = plan_folders(descriptors, self.config.max_batch_size)?;
        Ok((plan, failures))
    }

    async fn run_tags(&self, run: &mut PassRun<'_>, tags: Vec<SourceTag>) -> AppResult<()> {
        for source in tags {
            run.checkpoint()?;
            match tag_command(&source) {
                Ok(command) => run.emit(&source.id, command.into()).await?,
                Err(e) => run.invalid(&source.id, e),
            }
            run.advance();
        }
        Ok(())
    }

    async fn run_folders(
        &self,
        run: &mut PassRun<'_>,
        folders: Vec<SourceFolder>,
    ) -> AppResult<()> {
        let mut descriptors = Vec::with_capacity(folders.len());
        for source in &folders {
            match folder_descriptor(source) {
                Ok(descriptor) => descriptors.push(descriptor),
                Err(e) => {
                    run.invalid(&source.id, e);
                    run.advance();
                }
            }
        }

        let plan = plan_folders(descriptors, self.config.max_batch_size)?;
        run.summary.orphaned = plan.orphaned.len() as u64;

        for command in plan.commands {
            run.checkpoint()?;
            let source_id = command.folder_id.to_string();
            run.emit(&source_id, command.into()).await?;
            run.advance();
        }
        Ok(())
    }

    async fn run_assets(&self, run: &mut PassRun<'_>, assets: Vec<SourceAsset>) -> AppResult<()> {
        for source in assets {
            run.checkpoint()?;
            match asset_command(&source) {
                Ok(Some(command)) => run.emit(&source.id, command.into()).await?,
                Ok(None) => {
                    debug!(source_id = %source.id, "Asset has no resource, skipping");
                    run.summary.skipped_missing_resource += 1;
                }
                Err(e) => run.invalid(&source.id, e),
            }
            run.advance();
        }
        Ok(())
    }
}

/// State of one running pass.
struct PassRun<'a> {
    pipeline: &'a ImportPipeline,
    summary: PassSummary,
    deadline: Option<Instant>,
    done: u64,
}

impl<'a> PassRun<'a> {
    fn start(pipeline: &'a ImportPipeline, pass: ImportPass, total: u64) -> Self {
        let timeout = pipeline.config.pass_timeout_seconds;
        let deadline = (timeout > 0).then(|| Instant::now() + Duration::from_secs(timeout));

        let mut summary = PassSummary::new(pass);
        summary.total = total;
        pipeline.progress.start(pass, total);
        debug!(pass = %pass, total, "Import pass started");

        Self {
            pipeline,
            summary,
            deadline,
            done: 0,
        }
    }

    /// Fails if the pass was cancelled or ran out of time.
    fn checkpoint(&self) -> AppResult<()> {
        let pass = self.summary.pass;
        if self.pipeline.cancel.is_cancelled() {
            return Err(AppError::cancelled(format!(
                "Import of {pass} cancelled after {} records",
                self.done
            )));
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(AppError::timeout(format!(
                    "Import of {pass} exceeded {}s after {} records",
                    self.pipeline.config.pass_timeout_seconds, self.done
                )));
            }
        }
        Ok(())
    }

    async fn emit(&mut self, source_id: &str, command: Command) -> AppResult<()> {
        let name = command.name();
        match self.pipeline.dam.handle(command).await {
            Ok(()) => {
                self.summary.emitted += 1;
                Ok(())
            }
            Err(e) if is_per_entity(&e) => self.reject(source_id, name, e),
            Err(e) => Err(AppError::with_source(
                e.kind,
                format!("{name} for source record {source_id} failed: {}", e.message),
                e,
            )),
        }
    }

    fn reject(&mut self, source_id: &str, command: &str, error: AppError) -> AppResult<()> {
        let config = &self.pipeline.config;
        let duplicate = error.is_duplicate();
        if duplicate {
            self.summary.duplicates += 1;
            if config.skip_duplicates {
                debug!(source_id, command, "Already imported, skipping");
                return Ok(());
            }
        }

        warn!(
            source_id,
            command,
            kind = %error.kind,
            error = %error.message,
            "DAM rejected command"
        );
        self.summary
            .failures
            .push(ImportFailure::new(source_id, &error));

        if config.abort_on_rejection {
            return Err(AppError::new(
                error.kind,
                format!(
                    "{command} for source record {source_id} rejected: {}",
                    error.message
                ),
            ));
        }
        Ok(())
    }

    /// Records a source record that could not be converted into a command.
    fn invalid(&mut self, source_id: &str, error: AppError) {
        warn!(source_id, error = %error.message, "Invalid source record");
        self.summary
            .failures
            .push(ImportFailure::new(source_id, &error));
    }

    fn advance(&mut self) {
        self.done += 1;
        self.pipeline.progress.advance(self.summary.pass, self.done);
    }

    fn finish(self, result: AppResult<()>) -> AppResult<PassSummary> {
        let pass = self.summary.pass;
        self.pipeline.progress.finish(pass);
        match result {
            Ok(()) => {
                let summary = self.summary;
                info!(
                    pass = %pass,
                    emitted = summary.emitted,
                    duplicates = summary.duplicates,
                    skipped = summary.skipped_missing_resource,
                    orphaned = summary.orphaned,
                    failures = summary.failures.len(),
                    "Import pass summary"
                );
                Ok(summary)
            }
            Err(e) => {
                warn!(
                    pass = %pass,
                    emitted = self.summary.emitted,
                    kind = %e.kind,
                    error = %e.message,
                    "Import pass aborted"
                );
                Err(e)
            }
        }
    }
}

/// Errors that concern a single entity and do not stop the pass.
fn is_per_entity(error: &AppError) -> bool {
    error.is_rejection() || error.kind == ErrorKind::Validation
}

fn tag_command(source: &SourceTag) -> AppResult<AddTag> {
    Ok(AddTag {
        tag_id: TagId::parse(&source.id)?,
        label: TagLabel::new(source.label.as_str())?,
    })
}

fn folder_descriptor(source: &SourceFolder) -> AppResult<FolderDescriptor> {
    let parent_id = source
        .parent_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .map(FolderId::parse)
        .transpose()?;
    Ok(FolderDescriptor {
        id: FolderId::parse(&source.id)?,
        label: FolderLabel::new(source.title.as_str())?,
        parent_id,
    })
}

/// `None` when the asset has no binary resource.
fn asset_command(source: &SourceAsset) -> AppResult<Option<AddAsset>> {
    let Some(resource) = &source.resource else {
        return Ok(None);
    };

    let media_type = MediaType::new(&resource.media_type)?;
    let dimensions = if AssetType::from_media_type(&media_type).supports_dimensions() {
        Dimensions::from_source(source.width, source.height)
    } else {
        None
    };
    let tag_ids = source
        .tag_ids
        .iter()
        .map(|id| TagId::parse(id))
        .collect::<AppResult<BTreeSet<_>>>()?;
    let folder_id = source
        .collection_ids
        .first()
        .map(|id| FolderId::parse(id))
        .transpose()?;

    Ok(Some(AddAsset {
        asset_id: AssetId::parse(&source.id)?,
        media_type,
        resource_pointer: ResourcePointer::new(resource.sha1.as_str())?,
        filename: Filename::new(resource.filename.as_str())?,
        metadata: Metadata::none(),
        label: AssetLabel(source.label.clone()),
        caption: AssetCaption(source.caption.clone()),
        dimensions,
        folder_id,
        tag_ids,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dam_contracts::SourceResource;

    fn source_asset(media_type: &str) -> SourceAsset {
        SourceAsset {
            id: "a8f5f167-f44f-4964-8e6f-6f4f5f1e2d3c".to_string(),
            label: "Report".to_string(),
            caption: String::new(),
            resource: Some(SourceResource {
                sha1: "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12".to_string(),
                filename: "report.pdf".to_string(),
                media_type: media_type.to_string(),
            }),
            width: Some(640),
            height: Some(480),
            tag_ids: vec![],
            collection_ids: vec![
                "0f4a1b52-8d0e-4a55-9b3b-2e9c7d1f6a00".to_string(),
                "5c2d8e11-7b1a-4f0e-8d3c-9a6b4e2f1c77".to_string(),
            ],
        }
    }

    #[test]
    fn test_documents_carry_no_dimensions() {
        let command = asset_command(&source_asset("application/pdf"))
            .unwrap()
            .unwrap();
        assert_eq!(command.dimensions, None);
    }

    #[test]
    fn test_images_carry_dimensions() {
        let command = asset_command(&source_asset("image/png")).unwrap().unwrap();
        let dimensions = command.dimensions.unwrap();
        assert_eq!((dimensions.width, dimensions.height), (640, 480));
    }

    #[test]
    fn test_first_collection_becomes_folder() {
        let command = asset_command(&source_asset("image/png")).unwrap().unwrap();
        assert_eq!(
            command.folder_id,
            Some(FolderId::parse("0f4a1b52-8d0e-4a55-9b3b-2e9c7d1f6a00").unwrap())
        );
    }

    #[test]
    fn test_missing_resource_yields_no_command() {
        let asset = SourceAsset {
            resource: None,
            ..source_asset("image/png")
        };
        assert!(asset_command(&asset).unwrap().is_none());
    }

    #[test]
    fn test_blank_parent_is_root() {
        let source = SourceFolder {
            id: "0f4a1b52-8d0e-4a55-9b3b-2e9c7d1f6a00".to_string(),
            title: "Trips".to_string(),
            parent_id: Some(" ".to_string()),
        };
        assert_eq!(folder_descriptor(&source).unwrap().parent_id, None);
    }

    #[test]
    fn test_malformed_tag_id_is_validation_error() {
        let source = SourceTag {
            id: "not-a-uuid".to_string(),
            label: "sea".to_string(),
        };
        assert_eq!(tag_command(&source).unwrap_err().kind, ErrorKind::Validation);
    }
}
