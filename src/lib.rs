//! Student Info System
//!
//! A small record-keeping application for student and teacher data with
//! an append-only audit log of every mutation, driven through a CLI menu
//! or a web UI.
//!
//! # Modules
//!
//! - `types`: Core data structures (Student, Teacher, LogEntry, Outcome)
//! - `store`: Disk-backed entity stores with key uniqueness and audit logging
//! - `audit`: Append-only action log attached to each store
//! - `cli`: Menu-driven terminal front end
//! - `web`: Axum web front end (student list, master log, principal area)
//! - `utils`: Timestamp formatting and atomic file writes
//!
//! # Example
//!
//! ```no_run
//! use student_info::{Student, StudentStore};
//!
//! let mut store = StudentStore::open("students.json", "master_log.json");
//! let outcome = store
//!     .add(Student::new("Alice", 10, "5A", "101", None))
//!     .unwrap();
//! assert!(outcome.ok);
//! ```

pub mod audit;
pub mod cli;
pub mod store;
pub mod types;
pub mod utils;
pub mod web;

// Re-export commonly used items at crate root
pub use audit::{ActionLog, LogFilter};
pub use store::{EntityStore, StudentStore, TeacherStore};
pub use types::{
    LogAction, LogEntry, Outcome, Record, StoreError, StoreResult, Student, StudentChanges,
    Teacher, TeacherChanges,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
