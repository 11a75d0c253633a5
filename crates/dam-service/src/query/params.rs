//! Typed view of the filter-related request variables.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_entity::AssetFilter;

/// Filter variables of an asset query. Every field is optional; `null`
/// and absent mean the same thing, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterParams {
    /// `audio`, `document`, `image`, `video` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    /// Legacy spelling of `assetType`, used only when `assetType` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    /// Folder restriction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// `lastModified` or anything else for name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `DESC` or anything else for ascending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
}

impl FilterParams {
    /// Reads the filter variables out of a request variables map. The map
    /// is not modified.
    pub fn from_map(variables: &Map<String, Value>) -> AppResult<Self> {
        serde_json::from_value(Value::Object(variables.clone())).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Invalid asset query variables: {e}"),
                e,
            )
        })
    }

    /// The variables map these params were read from (absent fields omitted).
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Converts a filter back into the request variables that produce it.
pub trait ToFilterParams {
    /// Variables that compose to an equal filter.
    fn to_params(&self) -> FilterParams;
}

impl ToFilterParams for AssetFilter {
    fn to_params(&self) -> FilterParams {
        let ordering = self.ordering();
        let pagination = self.pagination();
        FilterParams {
            asset_type: self.asset_type().map(|t| t.as_str().to_string()),
            media_type: None,
            tag_id: self.tag_id().map(|id| id.to_string()),
            asset_collection_id: self.folder_id().map(|id| id.to_string()),
            search_term: self.search_term().map(|term| term.as_str().to_string()),
            sort_by: Some(ordering.field.as_param().to_string()),
            sort_direction: Some(ordering.direction.as_param().to_string()),
            limit: Some(i64::from(pagination.limit())),
            offset: Some(i64::try_from(pagination.offset()).unwrap_or(i64::MAX)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_unknown_keys() {
        let variables = json!({"tagId": null, "unexpected": 1, "limit": 5});
        let params = FilterParams::from_map(variables.as_object().unwrap()).unwrap();
        assert_eq!(params.tag_id, None);
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_wrong_type_is_validation_error() {
        let variables = json!({"limit": "five"});
        let err = FilterParams::from_map(variables.as_object().unwrap()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_to_map_omits_absent_fields() {
        let params = FilterParams {
            search_term: Some("beach".to_string()),
            ..FilterParams::default()
        };
        let map = params.to_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map["searchTerm"], "beach");
    }
}
