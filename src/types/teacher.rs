//! Teacher record types

use serde::{Deserialize, Serialize};

use super::Record;
use crate::utils::time::now_stamp;

/// A teacher record, keyed by username
///
/// The password is stored in clear for compatibility with the existing
/// data files. A real deployment must hash credentials instead; the
/// field shape here only preserves observable behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub username: String,
    pub password: String,
    #[serde(default = "now_stamp")]
    pub last_password_change: String,
}

impl Teacher {
    /// Create a teacher with the password-change timestamp set to now
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            last_password_change: now_stamp(),
        }
    }
}

impl Record for Teacher {
    const NOUN: &'static str = "Teacher";
    const SNAPSHOT_FIELD: &'static str = "teacher";

    fn key(&self) -> &str {
        &self.username
    }

    fn filter_name(&self) -> &str {
        &self.username
    }

    fn label(&self) -> &str {
        &self.username
    }

    fn describe(key: &str) -> String {
        format!("Teacher with username {}", key)
    }
}

/// Partial update for a teacher record
///
/// Only the password is editable. Resubmitting the stored password is a
/// no-op: the change timestamp stays put and nothing is logged.
#[derive(Debug, Clone, Default)]
pub struct TeacherChanges {
    pub password: Option<String>,
}
