//! Media type and the coarse asset type derived from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dam_core::AppError;

/// A validated `type/subtype` media type, stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaType(String);

impl MediaType {
    /// Parse a media type such as `image/jpeg`. Parameters after `;` are dropped.
    pub fn new(value: &str) -> Result<Self, AppError> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        let mut parts = essence.splitn(2, '/');
        let (kind, subtype) = (parts.next().unwrap_or_default(), parts.next().unwrap_or_default());
        let valid = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace) && !s.contains('/');
        if !valid(kind) || !valid(subtype) {
            return Err(AppError::validation(format!("Invalid media type '{value}'")));
        }
        Ok(Self(essence.to_ascii_lowercase()))
    }

    /// The full media type string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The top-level type (`image` for `image/png`).
    pub fn top_level(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MediaType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> String {
        media_type.0
    }
}

/// Coarse classification of assets used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Audio files.
    Audio,
    /// Anything that is not audio, image or video.
    Document,
    /// Still images.
    Image,
    /// Moving images.
    Video,
}

impl AssetType {
    /// Classify a media type.
    pub fn from_media_type(media_type: &MediaType) -> Self {
        match media_type.top_level() {
            "image" => Self::Image,
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Document,
        }
    }

    /// Whether assets of this type carry width/height.
    pub fn supports_dimensions(&self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }

    /// The request-parameter spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(Self::Audio),
            "document" => Ok(Self::Document),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(AppError::validation(format!(
                "Unknown asset type '{other}', expected one of audio, document, image, video"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_normalized() {
        let media_type = MediaType::new("Image/JPEG; charset=binary").expect("valid");
        assert_eq!(media_type.as_str(), "image/jpeg");
    }

    #[test]
    fn test_media_type_requires_subtype() {
        assert!(MediaType::new("image").is_err());
        assert!(MediaType::new("image/").is_err());
        assert!(MediaType::new("").is_err());
    }

    #[test]
    fn test_asset_type_classification() {
        let classify = |s: &str| AssetType::from_media_type(&MediaType::new(s).expect("valid"));
        assert_eq!(classify("image/png"), AssetType::Image);
        assert_eq!(classify("video/mp4"), AssetType::Video);
        assert_eq!(classify("audio/mpeg"), AssetType::Audio);
        assert_eq!(classify("application/pdf"), AssetType::Document);
    }

    #[test]
    fn test_dimension_support() {
        assert!(AssetType::Image.supports_dimensions());
        assert!(AssetType::Video.supports_dimensions());
        assert!(!AssetType::Audio.supports_dimensions());
        assert!(!AssetType::Document.supports_dimensions());
    }

    #[test]
    fn test_unknown_asset_type_rejected() {
        assert!("bogus".parse::<AssetType>().is_err());
        assert_eq!("video".parse::<AssetType>().expect("valid"), AssetType::Video);
    }
}
