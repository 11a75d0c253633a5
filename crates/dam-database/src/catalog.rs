//! Read-only source catalog over the legacy media library tables.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use dam_contracts::{SourceAsset, SourceCatalog, SourceFolder, SourceResource, SourceTag};
use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;

const TAG_TABLE: &str = "neos_media_domain_model_tag";
const COLLECTION_TABLE: &str = "neos_media_domain_model_assetcollection";
const ASSET_TABLE: &str = "neos_media_domain_model_asset";

const REQUIRED_TABLES: [&str; 3] = [TAG_TABLE, COLLECTION_TABLE, ASSET_TABLE];

fn missing_tables(present: &[String]) -> Vec<&'static str> {
    REQUIRED_TABLES
        .into_iter()
        .filter(|table| !present.iter().any(|p| p == table))
        .collect()
}

/// Image variants live in the asset table but are derived from an original.
const VARIANT_DTYPE: &str = "neos_media_imagevariant";

const ASSET_QUERY: &str = r#"
SELECT a.persistence_object_identifier AS id,
       COALESCE(NULLIF(a.title, ''), r.filename, '') AS label,
       COALESCE(a.caption, '') AS caption,
       r.sha1 AS sha1,
       r.filename AS filename,
       r.mediatype AS media_type,
       COALESCE(i.width, v.width)::BIGINT AS width,
       COALESCE(i.height, v.height)::BIGINT AS height,
       ARRAY(
           SELECT t.media_tag::TEXT
           FROM neos_media_domain_model_asset_tags_join t
           WHERE t.media_asset = a.persistence_object_identifier
           ORDER BY t.media_tag
       ) AS tag_ids,
       ARRAY(
           SELECT j.media_assetcollection::TEXT
           FROM neos_media_domain_model_assetcollection_assets_join j
           JOIN neos_media_domain_model_assetcollection c
             ON c.persistence_object_identifier = j.media_assetcollection
           WHERE j.media_asset = a.persistence_object_identifier
           ORDER BY c.title, c.persistence_object_identifier
       ) AS collection_ids
FROM neos_media_domain_model_asset a
LEFT JOIN neos_flow_resourcemanagement_persistentresource r
  ON r.persistence_object_identifier = a.resource
LEFT JOIN neos_media_domain_model_image i
  ON i.persistence_object_identifier = a.persistence_object_identifier
LEFT JOIN neos_media_domain_model_video v
  ON v.persistence_object_identifier = a.persistence_object_identifier
WHERE a.dtype <> $1
ORDER BY a.persistence_object_identifier
"#;

#[derive(Debug, FromRow)]
struct TagRow {
    id: String,
    label: String,
}

#[derive(Debug, FromRow)]
struct CollectionRow {
    id: String,
    title: String,
    parent_id: Option<String>,
}

#[derive(Debug, FromRow)]
struct AssetRow {
    id: String,
    label: String,
    caption: String,
    sha1: Option<String>,
    filename: Option<String>,
    media_type: Option<String>,
    width: Option<i64>,
    height: Option<i64>,
    tag_ids: Vec<String>,
    collection_ids: Vec<String>,
}

impl From<TagRow> for SourceTag {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            label: row.label,
        }
    }
}

impl From<CollectionRow> for SourceFolder {
    fn from(row: CollectionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            parent_id: row.parent_id,
        }
    }
}

impl From<AssetRow> for SourceAsset {
    fn from(row: AssetRow) -> Self {
        // A dangling resource reference yields no sha1; the asset has no binary.
        let resource = match (row.sha1, row.filename, row.media_type) {
            (Some(sha1), Some(filename), Some(media_type)) => Some(SourceResource {
                sha1,
                filename,
                media_type,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            label: row.label,
            caption: row.caption,
            resource,
            width: row.width,
            height: row.height,
            tag_ids: row.tag_ids,
            collection_ids: row.collection_ids,
        }
    }
}

/// Source catalog reading the legacy media tables through sqlx.
#[derive(Debug, Clone)]
pub struct PgSourceCatalog {
    pool: PgPool,
}

impl PgSourceCatalog {
    /// Create a catalog reader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fails with `Configuration` when the database lacks one of the media
    /// library tables.
    pub async fn verify_schema(&self) -> AppResult<()> {
        let present: Vec<String> = sqlx::query_scalar(
            "SELECT table_name::TEXT FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name::TEXT = ANY($1)",
        )
        .bind(&REQUIRED_TABLES[..])
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to inspect catalog schema", e)
        })?;

        let missing = missing_tables(&present);
        if !missing.is_empty() {
            return Err(AppError::configuration(format!(
                "Not a media catalog, missing tables: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Older schemas have flat collections without a parent column.
    async fn collections_have_parent(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM information_schema.columns \
             WHERE table_name = $1 AND column_name = 'parent')",
        )
        .bind(COLLECTION_TABLE)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to inspect collection schema", e)
        })
    }

    async fn count(&self, sql: &str, what: &str) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to count {what}"), e)
            })?;
        Ok(total.max(0) as u64)
    }
}

#[async_trait]
impl SourceCatalog for PgSourceCatalog {
    async fn count_tags(&self) -> AppResult<u64> {
        self.count(&format!("SELECT COUNT(*) FROM {TAG_TABLE}"), "tags")
            .await
    }

    async fn count_folders(&self) -> AppResult<u64> {
        self.count(
            &format!("SELECT COUNT(*) FROM {COLLECTION_TABLE}"),
            "asset collections",
        )
        .await
    }

    async fn count_assets(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {ASSET_TABLE} WHERE dtype <> $1"
        ))
        .bind(VARIANT_DTYPE)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count assets", e))?;
        Ok(total.max(0) as u64)
    }

    async fn tags(&self) -> AppResult<Vec<SourceTag>> {
        let rows = sqlx::query_as::<_, TagRow>(&format!(
            "SELECT persistence_object_identifier::TEXT AS id, label FROM {TAG_TABLE} \
             ORDER BY persistence_object_identifier"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read tags", e))?;

        debug!(count = rows.len(), "Read source tags");
        Ok(rows.into_iter().map(SourceTag::from).collect())
    }

    async fn folders(&self) -> AppResult<Vec<SourceFolder>> {
        let parent_column = if self.collections_have_parent().await? {
            "parent::TEXT"
        } else {
            "NULL::TEXT"
        };
        let rows = sqlx::query_as::<_, CollectionRow>(&format!(
            "SELECT persistence_object_identifier::TEXT AS id, title, {parent_column} AS parent_id \
             FROM {COLLECTION_TABLE} ORDER BY persistence_object_identifier"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read asset collections", e)
        })?;

        debug!(count = rows.len(), "Read source asset collections");
        Ok(rows.into_iter().map(SourceFolder::from).collect())
    }

    async fn assets(&self) -> AppResult<Vec<SourceAsset>> {
        let rows = sqlx::query_as::<_, AssetRow>(ASSET_QUERY)
            .bind(VARIANT_DTYPE)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read assets", e))?;

        debug!(count = rows.len(), "Read source assets");
        Ok(rows.into_iter().map(SourceAsset::from).collect())
    }
}
