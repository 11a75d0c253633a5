//! Newtype wrappers around [`uuid::Uuid`] for the DAM entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `TagId` where a
//! `FolderId` is expected. Identifiers either come from the source catalog
//! (migration keeps the legacy ids) or are freshly generated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Macro to define a newtype ID wrapper around `Uuid`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier, reporting a validation error that names
            /// the identifier kind.
            pub fn parse(value: &str) -> Result<Self, AppError> {
                value.trim().parse::<Self>().map_err(|e| {
                    AppError::with_source(
                        crate::error::ErrorKind::Validation,
                        format!("Malformed {} '{}': {e}", $label, value),
                        e,
                    )
                })
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Return a reference to the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for an asset.
    AssetId, "asset id"
);

define_id!(
    /// Unique identifier for a folder (asset collection in the legacy catalog).
    FolderId, "folder id"
);

define_id!(
    /// Unique identifier for a tag.
    TagId, "tag id"
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_folder_id_new() {
        let id1 = FolderId::new();
        let id2 = FolderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        let id = AssetId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_parse_trims_and_accepts_uuid() {
        let uuid = Uuid::new_v4();
        let id = TagId::parse(&format!(" {uuid} ")).expect("should parse");
        assert_eq!(id.0, uuid);
    }

    #[test]
    fn test_parse_malformed_is_validation_error() {
        let err = FolderId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("folder id"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = TagId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
    }
}
