//! Convenience result type alias for the DAM bridge.

use crate::error::AppError;

/// A specialized `Result` type for DAM bridge operations.
pub type AppResult<T> = Result<T, AppError>;
