//! Data types for the Student Info System
//!
//! This module contains all the core data structures used throughout the application.

mod log;
mod student;
mod teacher;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use log::{LogAction, LogEntry};
pub use student::{Student, StudentChanges};
pub use teacher::{Teacher, TeacherChanges};

/// Result type for store and log operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store and log operations
///
/// Expected domain failures (duplicate key, missing key) are reported as
/// [`Outcome`] values, not errors. This type covers unexpected I/O and
/// serialization faults during writes, which have no recovery strategy
/// and are allowed to propagate.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Success flag plus human-readable message for an expected store outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// A record that can live in an [`EntityStore`](crate::store::EntityStore)
/// and be snapshotted into its action log.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Noun used in human-readable messages ("Student" / "Teacher")
    const NOUN: &'static str;

    /// JSON field name carrying this record's snapshot in log entries
    /// ("student" / "teacher")
    const SNAPSHOT_FIELD: &'static str;

    /// Unique key addressing the record within its table
    fn key(&self) -> &str;

    /// Value matched by the log's case-insensitive name filter
    fn filter_name(&self) -> &str;

    /// Value shown in success messages ("Alice" / "msmith")
    fn label(&self) -> &str;

    /// Human description of a key, e.g. "Student with roll number 101"
    fn describe(key: &str) -> String;
}
