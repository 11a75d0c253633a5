//! Asset query construction from request variables.

pub mod composer;
pub mod params;

pub use composer::FilterComposer;
pub use params::{FilterParams, ToFilterParams};
