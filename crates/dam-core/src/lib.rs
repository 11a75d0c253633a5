//! # dam-core
//!
//! Core crate for the DAM bridge. Contains configuration schemas, typed
//! identifiers, pagination/ordering types, the progress reporting trait
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other DAM bridge crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
