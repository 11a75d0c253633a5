//! Asset value objects.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use dam_core::AppError;

/// Content-addressed reference to an asset's binary payload (e.g. a SHA-1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcePointer(String);

impl ResourcePointer {
    /// Create a pointer. Must be non-empty and free of whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        if value.is_empty() || value.contains(char::is_whitespace) {
            return Err(AppError::validation(format!(
                "Invalid resource pointer '{value}'"
            )));
        }
        Ok(Self(value))
    }

    /// The pointer value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourcePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResourcePointer {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourcePointer> for String {
    fn from(pointer: ResourcePointer) -> String {
        pointer.0
    }
}

/// Original file name of the stored resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Filename(String);

impl Filename {
    /// Create a file name, rejecting empty names.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::validation("Filename must not be empty"));
        }
        Ok(Self(value))
    }

    /// The file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Filename {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Filename> for String {
    fn from(filename: Filename) -> String {
        filename.0
    }
}

/// Human-readable asset label. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetLabel(pub String);

impl AssetLabel {
    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetLabel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Asset caption. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCaption(pub String);

impl AssetCaption {
    /// The caption text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetCaption {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Pixel dimensions of visual media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions. Both sides must be positive.
    pub fn from_width_and_height(width: u32, height: u32) -> Result<Self, AppError> {
        if width == 0 || height == 0 {
            return Err(AppError::validation(format!(
                "Dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Build dimensions from possibly unknown or non-positive source values.
    pub fn from_source(width: Option<i64>, height: Option<i64>) -> Option<Self> {
        let width = u32::try_from(width?).ok()?;
        let height = u32::try_from(height?).ok()?;
        Self::from_width_and_height(width, height).ok()
    }
}

/// Opaque key/value metadata attached to an asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub BTreeMap<String, String>);

impl Metadata {
    /// Empty metadata.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether no entries are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_pointer_rejects_whitespace() {
        assert!(ResourcePointer::new("").is_err());
        assert!(ResourcePointer::new("ab cd").is_err());
        assert!(ResourcePointer::new("2fd4e1c67a2d28fced849ee1bb76e7391b93eb12").is_ok());
    }

    #[test]
    fn test_dimensions_must_be_positive() {
        assert!(Dimensions::from_width_and_height(0, 10).is_err());
        assert_eq!(
            Dimensions::from_width_and_height(640, 480).expect("valid"),
            Dimensions {
                width: 640,
                height: 480
            }
        );
    }

    #[test]
    fn test_dimensions_from_source() {
        assert_eq!(Dimensions::from_source(None, Some(10)), None);
        assert_eq!(Dimensions::from_source(Some(-1), Some(10)), None);
        assert_eq!(Dimensions::from_source(Some(0), Some(10)), None);
        assert_eq!(
            Dimensions::from_source(Some(3000), Some(2000)),
            Some(Dimensions {
                width: 3000,
                height: 2000
            })
        );
    }
}
