//! Core traits defined in `dam-core` and implemented by other crates.

pub mod progress;

pub use progress::{ImportPass, ImportProgress, NoopProgress, TracingProgress};
