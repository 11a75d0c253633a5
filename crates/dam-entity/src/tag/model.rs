//! Tag read model.

use serde::{Deserialize, Serialize};

use dam_core::types::TagId;

use crate::label::define_label;

define_label!(
    /// Display label of a tag.
    TagLabel, "Tag label"
);

/// A flat, non-hierarchical tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: TagId,
    /// Tag label.
    pub label: TagLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_trimmed() {
        let label = TagLabel::new("  landscape ").expect("valid");
        assert_eq!(label.as_str(), "landscape");
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = TagLabel::new("   ").unwrap_err();
        assert_eq!(err.kind, dam_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_blank_label_rejected_on_deserialize() {
        let parsed: Result<TagLabel, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }
}
