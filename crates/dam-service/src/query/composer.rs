//! Builds [`AssetFilter`]s from untrusted request variables.

use serde_json::{Map, Value};

use dam_core::config::QueryConfig;
use dam_core::error::AppError;
use dam_core::result::AppResult;
use dam_core::types::{
    FolderId, Ordering, OrderingDirection, OrderingField, Pagination, TagId,
};
use dam_entity::{AssetFilter, AssetType, SearchTerm};

use super::params::FilterParams;

/// Value of `assetType` that means "no restriction".
const ALL_ASSET_TYPES: &str = "all";

/// Turns filter variables into a fully populated [`AssetFilter`].
///
/// The composer holds only configuration and is safe to share.
#[derive(Debug, Clone, Default)]
pub struct FilterComposer {
    config: QueryConfig,
}

impl FilterComposer {
    /// Creates a composer with the given pagination bounds.
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Composes a filter from a raw variables map.
    pub fn compose_map(&self, variables: &Map<String, Value>) -> AppResult<AssetFilter> {
        self.compose(&FilterParams::from_map(variables)?)
    }

    /// Composes a filter from typed variables.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown asset type, a malformed tag or folder id,
    /// or a limit/offset out of range.
    pub fn compose(&self, params: &FilterParams) -> AppResult<AssetFilter> {
        let mut filter = AssetFilter::create();

        let asset_type = params.asset_type.as_ref().or(params.media_type.as_ref());
        if let Some(value) = asset_type.filter(|v| !v.is_empty() && v.as_str() != ALL_ASSET_TYPES) {
            filter = filter.with_asset_type(value.parse::<AssetType>()?);
        }
        if let Some(value) = non_empty(&params.tag_id) {
            filter = filter.with_tag_id(TagId::parse(value)?);
        }
        if let Some(value) = non_empty(&params.asset_collection_id) {
            filter = filter.with_folder_id(FolderId::parse(value)?);
        }
        if let Some(value) = params.search_term.as_deref().filter(|v| !v.trim().is_empty()) {
            filter = filter.with_search_term(SearchTerm::new(value)?);
        }

        let field = match params.sort_by.as_deref() {
            Some("lastModified") => OrderingField::LastModified,
            _ => OrderingField::Name,
        };
        let direction = match params.sort_direction.as_deref() {
            Some("DESC") => OrderingDirection::Descending,
            _ => OrderingDirection::Ascending,
        };

        Ok(filter
            .with_ordering(Ordering::by(field, direction))
            .with_pagination(self.pagination(params)?))
    }

    fn pagination(&self, params: &FilterParams) -> AppResult<Pagination> {
        let max_limit = self.config.max_limit;
        let limit = match params.limit {
            None => self.config.default_limit,
            Some(limit) => u32::try_from(limit)
                .ok()
                .filter(|l| (1..=max_limit).contains(l))
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "limit must be between 1 and {max_limit}, got {limit}"
                    ))
                })?,
        };
        let offset = match params.offset {
            None => 0,
            Some(offset) => u64::try_from(offset).map_err(|_| {
                AppError::validation(format!("offset must not be negative, got {offset}"))
            })?,
        };
        Pagination::from_limit_and_offset(limit, offset)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dam_core::error::ErrorKind;

    fn params() -> FilterParams {
        FilterParams::default()
    }

    #[test]
    fn test_all_means_no_asset_type() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                asset_type: Some("all".to_string()),
                ..params()
            })
            .unwrap();
        assert_eq!(filter.asset_type(), None);
    }

    #[test]
    fn test_media_type_fallback() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                media_type: Some("image".to_string()),
                ..params()
            })
            .unwrap();
        assert_eq!(filter.asset_type(), Some(AssetType::Image));
    }

    #[test]
    fn test_asset_type_shadows_media_type_even_when_empty() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                asset_type: Some(String::new()),
                media_type: Some("image".to_string()),
                ..params()
            })
            .unwrap();
        assert_eq!(filter.asset_type(), None);
    }

    #[test]
    fn test_sort_direction_without_sort_by() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                sort_direction: Some("DESC".to_string()),
                ..params()
            })
            .unwrap();
        assert_eq!(
            filter.ordering(),
            Ordering::by(OrderingField::Name, OrderingDirection::Descending)
        );
    }

    #[test]
    fn test_unknown_sort_values_fall_back() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                sort_by: Some("size".to_string()),
                sort_direction: Some("desc".to_string()),
                ..params()
            })
            .unwrap();
        assert_eq!(filter.ordering(), Ordering::default());
    }

    #[test]
    fn test_limit_bounds() {
        let composer = FilterComposer::new(QueryConfig {
            default_limit: 20,
            max_limit: 50,
        });
        for limit in [0, -1, 51] {
            let err = composer
                .compose(&FilterParams {
                    limit: Some(limit),
                    ..params()
                })
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "limit {limit}");
        }
        let filter = composer
            .compose(&FilterParams {
                limit: Some(50),
                ..params()
            })
            .unwrap();
        assert_eq!(filter.pagination().limit(), 50);
    }

    #[test]
    fn test_negative_offset() {
        let err = FilterComposer::default()
            .compose(&FilterParams {
                offset: Some(-5),
                ..params()
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_malformed_ids() {
        let composer = FilterComposer::default();
        let tag = composer.compose(&FilterParams {
            tag_id: Some("nope".to_string()),
            ..params()
        });
        let folder = composer.compose(&FilterParams {
            asset_collection_id: Some("nope".to_string()),
            ..params()
        });
        assert_eq!(tag.unwrap_err().kind, ErrorKind::Validation);
        assert_eq!(folder.unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_blank_search_term_is_absent() {
        let filter = FilterComposer::default()
            .compose(&FilterParams {
                search_term: Some("   ".to_string()),
                ..params()
            })
            .unwrap();
        assert!(filter.search_term().is_none());
    }
}
