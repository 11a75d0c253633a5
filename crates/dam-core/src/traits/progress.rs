//! Progress reporting for long-running import passes.
//!
//! Progress sinks are purely advisory: implementations must not fail and
//! nothing they do influences the pipeline's control flow.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::info;

/// The import pass a progress notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPass {
    /// Tag import.
    Tags,
    /// Folder import.
    Folders,
    /// Asset import.
    Assets,
}

impl fmt::Display for ImportPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags => write!(f, "tags"),
            Self::Folders => write!(f, "folders"),
            Self::Assets => write!(f, "assets"),
        }
    }
}

/// Receives count-so-far / total notifications during an import pass.
pub trait ImportProgress: Send + Sync {
    /// A pass started with `total` source records.
    fn start(&self, pass: ImportPass, total: u64);

    /// `done` records of the pass have been processed so far.
    fn advance(&self, pass: ImportPass, done: u64);

    /// The pass finished (successfully or not).
    fn finish(&self, pass: ImportPass);
}

/// A progress sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ImportProgress for NoopProgress {
    fn start(&self, _pass: ImportPass, _total: u64) {}

    fn advance(&self, _pass: ImportPass, _done: u64) {}

    fn finish(&self, _pass: ImportPass) {}
}

/// A progress sink that logs through `tracing` every `interval` records.
#[derive(Debug)]
pub struct TracingProgress {
    interval: u64,
    total: AtomicU64,
    last: AtomicU64,
}

impl TracingProgress {
    /// Creates a sink logging every `interval` records (minimum 1).
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            total: AtomicU64::new(0),
            last: AtomicU64::new(0),
        }
    }
}

impl ImportProgress for TracingProgress {
    fn start(&self, pass: ImportPass, total: u64) {
        self.total.store(total, Ordering::Relaxed);
        self.last.store(0, Ordering::Relaxed);
        info!(pass = %pass, total, "Import pass started");
    }

    fn advance(&self, pass: ImportPass, done: u64) {
        let total = self.total.load(Ordering::Relaxed);
        if done >= self.last.load(Ordering::Relaxed) + self.interval || done == total {
            self.last.store(done, Ordering::Relaxed);
            info!(pass = %pass, done, total, "Import progress");
        }
    }

    fn finish(&self, pass: ImportPass) {
        info!(pass = %pass, "Import pass finished");
    }
}
