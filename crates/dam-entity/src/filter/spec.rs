//! The immutable asset filter spec.
//!
//! Every refinement returns a new [`AssetFilter`]; a shared base filter
//! can therefore be forked for several queries without coordination.

use std::cmp;
use std::fmt;

use serde::{Deserialize, Serialize};

use dam_core::AppError;
use dam_core::types::{FolderId, Ordering, OrderingField, Pagination, TagId};

use crate::asset::{Asset, AssetType};

/// Free-text search term, matched case-insensitively against label and filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Create a search term. Blank input is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The search text as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SearchTerm {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchTerm> for String {
    fn from(term: SearchTerm) -> String {
        term.0
    }
}

/// Search request against the asset catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetFilter {
    asset_type: Option<AssetType>,
    tag_id: Option<TagId>,
    folder_id: Option<FolderId>,
    search_term: Option<SearchTerm>,
    ordering: Ordering,
    pagination: Pagination,
}

impl AssetFilter {
    /// A filter that matches everything, ordered by name ascending, first 20.
    pub fn create() -> Self {
        Self::default()
    }

    /// Restrict to an asset type.
    pub fn with_asset_type(&self, asset_type: AssetType) -> Self {
        Self {
            asset_type: Some(asset_type),
            ..self.clone()
        }
    }

    /// Restrict to assets carrying a tag.
    pub fn with_tag_id(&self, tag_id: TagId) -> Self {
        Self {
            tag_id: Some(tag_id),
            ..self.clone()
        }
    }

    /// Restrict to assets directly inside a folder.
    pub fn with_folder_id(&self, folder_id: FolderId) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..self.clone()
        }
    }

    /// Restrict to assets matching a search term.
    pub fn with_search_term(&self, search_term: SearchTerm) -> Self {
        Self {
            search_term: Some(search_term),
            ..self.clone()
        }
    }

    /// Replace the ordering.
    pub fn with_ordering(&self, ordering: Ordering) -> Self {
        Self {
            ordering,
            ..self.clone()
        }
    }

    /// Replace the pagination window.
    pub fn with_pagination(&self, pagination: Pagination) -> Self {
        Self {
            pagination,
            ..self.clone()
        }
    }

    /// The asset type restriction.
    pub fn asset_type(&self) -> Option<AssetType> {
        self.asset_type
    }

    /// The tag restriction.
    pub fn tag_id(&self) -> Option<TagId> {
        self.tag_id
    }

    /// The folder restriction.
    pub fn folder_id(&self) -> Option<FolderId> {
        self.folder_id
    }

    /// The search term.
    pub fn search_term(&self) -> Option<&SearchTerm> {
        self.search_term.as_ref()
    }

    /// The ordering.
    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// The pagination window.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Whether an asset satisfies every predicate of this filter.
    /// Ordering and pagination are not predicates.
    pub fn matches(&self, asset: &Asset) -> bool {
        if let Some(asset_type) = self.asset_type {
            if asset.asset_type() != asset_type {
                return false;
            }
        }
        if let Some(tag_id) = self.tag_id {
            if !asset.tag_ids.contains(&tag_id) {
                return false;
            }
        }
        if let Some(folder_id) = self.folder_id {
            if asset.folder_id != Some(folder_id) {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            if !term.matches(asset.label.as_str()) && !term.matches(asset.filename.as_str()) {
                return false;
            }
        }
        true
    }

    /// Compare two assets according to this filter's ordering. Ties are
    /// broken by id so that pagination is stable.
    pub fn compare(&self, a: &Asset, b: &Asset) -> cmp::Ordering {
        let primary = match self.ordering.field {
            OrderingField::Name => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
            OrderingField::LastModified => a.last_modified.cmp(&b.last_modified),
        };
        self.ordering.directed(primary.then_with(|| a.id.cmp(&b.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dam_core::types::{OrderingDirection, OrderingField};

    #[test]
    fn test_refinement_does_not_mutate_base() {
        let base = AssetFilter::create();
        let images = base.with_asset_type(AssetType::Image);
        let videos = base.with_asset_type(AssetType::Video);

        assert_eq!(base.asset_type(), None);
        assert_eq!(images.asset_type(), Some(AssetType::Image));
        assert_eq!(videos.asset_type(), Some(AssetType::Video));
    }

    #[test]
    fn test_default_ordering_and_pagination() {
        let filter = AssetFilter::create();
        assert_eq!(
            filter.ordering(),
            Ordering::by(OrderingField::Name, OrderingDirection::Ascending)
        );
        assert_eq!(filter.pagination().limit(), 20);
        assert_eq!(filter.pagination().offset(), 0);
    }

    #[test]
    fn test_search_term_case_insensitive() {
        let term = SearchTerm::new("Sunset").expect("valid");
        assert!(term.matches("beach-SUNSET.jpg"));
        assert!(!term.matches("sunrise.jpg"));
    }
}
