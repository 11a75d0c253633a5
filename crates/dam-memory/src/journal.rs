//! JSON-lines journal of accepted commands.
//!
//! Each line is one [`JournalEntry`]. Replaying the journal in order
//! rebuilds the aggregate, including modification times.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use dam_core::error::{AppError, ErrorKind};
use dam_core::result::AppResult;
use dam_entity::Command;

/// One accepted command with the time it was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the command was applied.
    pub recorded_at: DateTime<Utc>,
    /// The command.
    pub command: Command,
}

/// Append-only command journal on the local filesystem.
#[derive(Debug)]
pub struct Journal {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl Journal {
    /// Creates a journal handle. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry. A missing file is an empty journal.
    ///
    /// A final line without its newline is a write torn by a crash. When it
    /// does not parse it is dropped with a warning and cut from the file;
    /// any other malformed line is an error.
    pub async fn read_all(&self) -> AppResult<Vec<JournalEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let complete = content.rfind('\n').map_or(0, |i| i + 1);
        let mut entries = Vec::new();
        for (index, line) in content[..complete].lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(line).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    format!(
                        "Corrupt journal entry at {}:{}",
                        self.path.display(),
                        index + 1
                    ),
                    e,
                )
            })?;
            entries.push(entry);
        }

        let tail = &content[complete..];
        if !tail.trim().is_empty() {
            match serde_json::from_str(tail) {
                Ok(entry) => {
                    entries.push(entry);
                    self.terminate_last_line().await?;
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        bytes = tail.len(),
                        error = %e,
                        "Dropping torn journal tail"
                    );
                    self.truncate(complete as u64).await?;
                }
            }
        }

        debug!(path = %self.path.display(), entries = entries.len(), "Journal read");
        Ok(entries)
    }

    async fn terminate_last_line(&self) -> AppResult<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }

    async fn truncate(&self, len: u64) -> AppResult<()> {
        let file = OpenOptions::new().write(true).open(&self.path).await?;
        file.set_len(len).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Appends one entry and flushes it.
    pub async fn append(&self, entry: &JournalEntry) -> AppResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut guard = self.file.lock().await;
        if guard.is_none() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            *guard = Some(file);
        }

        if let Some(file) = guard.as_mut() {
            file.write_all(line.as_bytes()).await?;
            file.flush().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dam_core::types::TagId;
    use dam_entity::TagLabel;
    use dam_entity::command::AddTag;

    fn entry(label: &str) -> JournalEntry {
        JournalEntry {
            recorded_at: Utc::now(),
            command: AddTag {
                tag_id: TagId::new(),
                label: TagLabel::new(label).expect("label"),
            }
            .into(),
        }
    }

    #[tokio::test]
    async fn test_torn_tail_is_dropped_and_cut() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let journal = Journal::new(&path);
        journal.append(&entry("kept")).await.unwrap();
        drop(journal);

        let mut content = tokio::fs::read_to_string(&path).await.unwrap();
        let intact = content.len();
        content.push_str("{\"recorded_at\":\"2026-");
        tokio::fs::write(&path, &content).await.unwrap();

        let journal = Journal::new(&path);
        let entries = journal.read_all().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            tokio::fs::metadata(&path).await.unwrap().len(),
            intact as u64
        );

        journal.append(&entry("next")).await.unwrap();
        assert_eq!(journal.read_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_middle_line_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let line = serde_json::to_string(&entry("kept")).unwrap();
        tokio::fs::write(&path, format!("not json\n{line}\n"))
            .await
            .unwrap();

        let err = Journal::new(&path).read_all().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn test_unterminated_valid_tail_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.jsonl");
        let line = serde_json::to_string(&entry("last")).unwrap();
        tokio::fs::write(&path, &line).await.unwrap();

        let journal = Journal::new(&path);
        assert_eq!(journal.read_all().await.unwrap().len(), 1);
        journal.append(&entry("next")).await.unwrap();
        assert_eq!(journal.read_all().await.unwrap().len(), 2);
    }
}
