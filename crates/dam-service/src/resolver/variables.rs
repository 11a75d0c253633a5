//! Typed access to request variables.

use serde_json::{Map, Value};

use dam_core::error::AppError;
use dam_core::result::AppResult;

/// A string variable that must be present.
pub(crate) fn required_str<'a>(variables: &'a Map<String, Value>, key: &str) -> AppResult<&'a str> {
    optional_str(variables, key)?
        .ok_or_else(|| AppError::validation(format!("Variable '{key}' is required")))
}

/// A string variable where absent and `null` both mean `None`.
pub(crate) fn optional_str<'a>(
    variables: &'a Map<String, Value>,
    key: &str,
) -> AppResult<Option<&'a str>> {
    match variables.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(AppError::validation(format!(
            "Variable '{key}' must be a string, got {other}"
        ))),
    }
}

/// A list of strings; absent and `null` yield an empty list.
pub(crate) fn string_list<'a>(
    variables: &'a Map<String, Value>,
    key: &str,
) -> AppResult<Vec<&'a str>> {
    let items = match variables.get(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AppError::validation(format!(
                "Variable '{key}' must be a list, got {other}"
            )));
        }
    };
    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| {
                AppError::validation(format!("Variable '{key}' must only contain strings"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_absent() {
        let variables = json!({"parent": null});
        let variables = variables.as_object().unwrap();
        assert_eq!(optional_str(variables, "parent").unwrap(), None);
        assert!(required_str(variables, "parent").is_err());
    }

    #[test]
    fn test_list_of_strings() {
        let variables = json!({"tagIds": ["a", "b"], "bad": [1]});
        let variables = variables.as_object().unwrap();
        assert_eq!(string_list(variables, "tagIds").unwrap(), vec!["a", "b"]);
        assert!(string_list(variables, "bad").is_err());
        assert!(string_list(variables, "missing").unwrap().is_empty());
    }
}
