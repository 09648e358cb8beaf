//! Student record types

use serde::{Deserialize, Serialize};

use super::Record;

/// A student record, keyed by roll number
///
/// The roll number is the immutable primary key; a record never changes
/// its own key. The on-disk field name for `class_label` is `class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub age: u32,
    #[serde(rename = "class")]
    pub class_label: String,
    pub roll_number: String,
    #[serde(default)]
    pub teacher_username: Option<String>,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        class_label: impl Into<String>,
        roll_number: impl Into<String>,
        teacher_username: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            class_label: class_label.into(),
            roll_number: roll_number.into(),
            teacher_username,
        }
    }
}

impl Record for Student {
    const NOUN: &'static str = "Student";
    const SNAPSHOT_FIELD: &'static str = "student";

    fn key(&self) -> &str {
        &self.roll_number
    }

    fn filter_name(&self) -> &str {
        &self.name
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn describe(key: &str) -> String {
        format!("Student with roll number {}", key)
    }
}

/// Partial update for a student record
///
/// `None` fields leave the stored value untouched. The roll number is
/// not editable. There is no way to clear an assigned teacher through an
/// edit; only replace it.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub class_label: Option<String>,
    pub teacher_username: Option<String>,
}
