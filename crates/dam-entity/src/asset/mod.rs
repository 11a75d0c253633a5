//! Asset domain entities.

pub mod media;
pub mod model;
pub mod value;

pub use media::{AssetType, MediaType};
pub use model::Asset;
pub use value::{AssetCaption, AssetLabel, Dimensions, Filename, Metadata, ResourcePointer};
