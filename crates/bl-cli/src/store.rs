//! JSONL event store.
//!
//! One record per line, append-only. Malformed lines are skipped with a
//! warning so a single bad record never takes down the whole log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bl_core::RawEvent;

/// Append-only JSONL store of raw log records.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in the log. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<RawEvent>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read {}", self.path.display()));
            }
        };

        let mut records = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawEvent>(trimmed) {
                Ok(record) => records.push(record),
                Err(error) => {
                    tracing::warn!(line = idx + 1, %error, "skipping malformed record");
                }
            }
        }
        Ok(records)
    }

    /// Appends one record, creating the file and its directory on first use.
    pub fn append(&self, record: &RawEvent) -> Result<()> {
        self.append_all(std::slice::from_ref(record))
    }

    /// Appends a batch of records in order.
    pub fn append_all(&self, records: &[RawEvent]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        for record in records {
            let json = serde_json::to_string(record).context("failed to serialize record")?;
            writeln!(file, "{json}").context("failed to write record")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::{EventId, SubjectId};
    use tempfile::TempDir;

    fn record(id: &str) -> RawEvent {
        RawEvent {
            id: EventId::new(id).unwrap(),
            subject_id: SubjectId::new("baby-1").unwrap(),
            category: "diaper".to_string(),
            start_time: "2024-03-10T09:00:00".to_string(),
            end_time: None,
            details: serde_json::json!({ "status": "wet" }),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn missing_file_is_an_empty_log() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join("events.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join("nested/events.jsonl"));

        store.append(&record("evt-1")).unwrap();
        store.append(&record("evt-2")).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_str(), "evt-1");
        assert_eq!(records[1].id.as_str(), "evt-2");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("events.jsonl");
        let store = Store::new(path.clone());
        store.append(&record("evt-1")).unwrap();

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json\n\n");
        std::fs::write(&path, content).unwrap();
        store.append(&record("evt-2")).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_str(), "evt-2");
    }
}
