//! Action Log - append-only audit record of store mutations
//!
//! Every mutation a store performs appends exactly one entry here,
//! synchronously, before the operation reports success. The log file is
//! a pretty-printed JSON array rewritten in full on every append: read
//! current contents, push one timestamped entry, write everything back.
//! A missing or corrupt file is treated as empty so corruption can never
//! block an append.

use std::marker::PhantomData;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::types::{LogAction, LogEntry, Record, StoreResult};
use crate::utils::{atomic_write, now_stamp};

/// Filter for querying log entries
///
/// Entries without a snapshot never match an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFilter {
    /// Case-insensitive equality on the snapshot's name field
    /// (student name / teacher username)
    Name(String),
    /// String equality on the snapshot's key field
    /// (roll number / username)
    Key(String),
}

impl LogFilter {
    fn matches<R: Record>(&self, entry: &LogEntry<R>) -> bool {
        let Some(snapshot) = &entry.snapshot else {
            return false;
        };
        match self {
            LogFilter::Name(name) => snapshot.filter_name().eq_ignore_ascii_case(name),
            LogFilter::Key(key) => snapshot.key() == key,
        }
    }
}

/// Durable, append-only record of everything an entity store did
pub struct ActionLog<R: Record> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

impl<R: Record> ActionLog<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    /// Append one entry stamped with the current time
    ///
    /// Reads the current log, pushes the entry and rewrites the whole
    /// file. Runs synchronously inside the triggering store operation.
    pub fn append(
        &self,
        action: LogAction,
        snapshot: Option<&R>,
        details: Option<Map<String, Value>>,
    ) -> StoreResult<()> {
        let mut entries = self.entries();
        entries.push(LogEntry {
            timestamp: now_stamp(),
            action,
            snapshot: snapshot.cloned(),
            details,
        });
        atomic_write(&self.path, &serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// All entries in order; a missing or corrupt file reads as empty
    pub fn entries(&self) -> Vec<LogEntry<R>> {
        if !self.path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("[Log] Error reading {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("[Log] Error parsing {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Ordered entries, optionally restricted by a [`LogFilter`]
    pub fn query(&self, filter: Option<&LogFilter>) -> Vec<LogEntry<R>> {
        let entries = self.entries();
        match filter {
            Some(filter) => entries
                .into_iter()
                .filter(|entry| filter.matches(entry))
                .collect(),
            None => entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Student;
    use tempfile::TempDir;

    fn alice() -> Student {
        Student::new("Alice", 10, "5A", "101", None)
    }

    #[test]
    fn test_append_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let log = ActionLog::<Student>::new(temp_dir.path().join("log.json"));

        log.append(LogAction::Add, Some(&alice()), None).unwrap();
        log.append(LogAction::View, Some(&alice()), None).unwrap();

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, LogAction::Add);
        assert_eq!(entries[1].action, LogAction::View);
        assert_eq!(entries[0].snapshot.as_ref().unwrap().roll_number, "101");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let log = ActionLog::<Student>::new(temp_dir.path().join("absent.json"));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_corrupt_file_does_not_block_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.json");
        std::fs::write(&path, "not json at all").unwrap();

        let log = ActionLog::<Student>::new(&path);
        log.append(LogAction::Add, Some(&alice()), None).unwrap();

        // Corrupt content was discarded, the new entry survives
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, LogAction::Add);
    }

    #[test]
    fn test_name_filter_is_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let log = ActionLog::<Student>::new(temp_dir.path().join("log.json"));

        log.append(LogAction::Add, Some(&alice()), None).unwrap();
        log.append(
            LogAction::Add,
            Some(&Student::new("Bob", 11, "5A", "102", None)),
            None,
        )
        .unwrap();
        log.append(LogAction::View, None, None).unwrap();

        let hits = log.query(Some(&LogFilter::Name("alice".to_string())));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].snapshot.as_ref().unwrap().name, "Alice");
    }

    #[test]
    fn test_key_filter_excludes_snapshotless_entries() {
        let temp_dir = TempDir::new().unwrap();
        let log = ActionLog::<Student>::new(temp_dir.path().join("log.json"));

        log.append(LogAction::Add, Some(&alice()), None).unwrap();
        log.append(LogAction::View, None, None).unwrap();

        let hits = log.query(Some(&LogFilter::Key("101".to_string())));
        assert_eq!(hits.len(), 1);

        let misses = log.query(Some(&LogFilter::Key("999".to_string())));
        assert!(misses.is_empty());
    }
}
