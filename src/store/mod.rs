//! Entity stores - disk-backed keyed collections with audit logging
//!
//! An [`EntityStore`] owns a uniquely-keyed in-memory table of records,
//! enforces key uniqueness, and persists the whole table to its backing
//! JSON file on every mutation. Each successful mutation announces
//! itself to the store's paired [`ActionLog`] before the operation
//! reports success; a failed mutation writes nothing and logs nothing.

mod student;
mod teacher;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::ActionLog;
use crate::types::{LogAction, Outcome, Record, Student, StoreResult, Teacher};
use crate::utils::atomic_write;

/// Store of student records keyed by roll number
pub type StudentStore = EntityStore<Student>;

/// Store of teacher records keyed by username
pub type TeacherStore = EntityStore<Teacher>;

/// Disk-backed keyed collection of records with a paired action log
///
/// The table lives entirely in memory (a `BTreeMap`, so iteration is in
/// key order) and is rewritten to disk synchronously after every
/// mutation. Designed for small, single-process, single-user datasets.
pub struct EntityStore<R: Record> {
    table_path: PathBuf,
    records: BTreeMap<String, R>,
    log: ActionLog<R>,
}

impl<R: Record> EntityStore<R> {
    /// Open a store backed by `table_path`, logging to `log_path`
    ///
    /// A missing or corrupt table file yields an empty store, never a
    /// hard failure; corruption is reported to the operator.
    pub fn open(table_path: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        let table_path = table_path.into();
        let records = Self::load_table(&table_path);
        Self {
            table_path,
            records,
            log: ActionLog::new(log_path),
        }
    }

    fn load_table(path: &Path) -> BTreeMap<String, R> {
        if !path.exists() {
            return BTreeMap::new();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("[Store] Error loading {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("[Store] Error parsing {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    /// Serialize the full table and overwrite the backing file
    pub fn save(&self) -> StoreResult<()> {
        atomic_write(
            &self.table_path,
            &serde_json::to_string_pretty(&self.records)?,
        )?;
        Ok(())
    }

    /// Insert a record, persist and log an `add` event
    ///
    /// An already-present key is a failure outcome: no mutation, no file
    /// write, no log entry.
    pub fn add(&mut self, record: R) -> StoreResult<Outcome> {
        let key = record.key().to_string();
        if self.records.contains_key(&key) {
            return Ok(Outcome::failure(format!(
                "{} already exists!",
                R::describe(&key)
            )));
        }
        let message = format!("{} '{}' added successfully!", R::NOUN, record.label());
        self.records.insert(key, record.clone());
        self.save()?;
        self.log.append(LogAction::Add, Some(&record), None)?;
        Ok(Outcome::success(message))
    }

    /// Delete a record, persist and log a `remove` event with the
    /// pre-deletion snapshot
    pub fn remove(&mut self, key: &str) -> StoreResult<Outcome> {
        match self.records.remove(key) {
            Some(record) => {
                self.save()?;
                self.log.append(LogAction::Remove, Some(&record), None)?;
                Ok(Outcome::success(format!(
                    "{} removed successfully!",
                    R::describe(key)
                )))
            }
            None => Ok(Outcome::failure(format!("{} not found!", R::describe(key)))),
        }
    }

    /// Look up a record by key; no side effects, no log entry
    pub fn get(&self, key: &str) -> Option<&R> {
        self.records.get(key)
    }

    /// All records in key order
    pub fn list(&self) -> Vec<R> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The store's action log
    ///
    /// Callers that want presentation-level events (the CLI's `view`)
    /// append them here themselves; the store only logs mutations.
    pub fn log(&self) -> &ActionLog<R> {
        &self.log
    }

    /// Mutable access for the concrete edit implementations
    pub(crate) fn records_mut(&mut self) -> &mut BTreeMap<String, R> {
        &mut self.records
    }
}
