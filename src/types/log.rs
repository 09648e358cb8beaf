//! Audit log entry types
//!
//! Log entries are immutable once written. Each entry carries a snapshot
//! of the affected record under a per-entity field name (`student` or
//! `teacher`), so the two log files share one shape while keeping their
//! historical field names.

use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::Record;

/// Action tags recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    /// A record was inserted
    Add,
    /// A record was deleted
    Remove,
    /// A record's fields were updated
    Edit,
    /// A teacher's password actually changed
    EditPassword,
    /// A record was displayed (CLI detail view only)
    View,
}

impl std::fmt::Display for LogAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogAction::Add => write!(f, "add"),
            LogAction::Remove => write!(f, "remove"),
            LogAction::Edit => write!(f, "edit"),
            LogAction::EditPassword => write!(f, "edit_password"),
            LogAction::View => write!(f, "view"),
        }
    }
}

/// One immutable entry in an action log
///
/// Serialized as `{timestamp, action, <student|teacher>, details}` where
/// the snapshot field name comes from [`Record::SNAPSHOT_FIELD`].
#[derive(Debug, Clone)]
pub struct LogEntry<R: Record> {
    /// Second-precision local timestamp, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub action: LogAction,
    /// Full field set of the affected record at the time of the action
    pub snapshot: Option<R>,
    /// Free-form description of what changed, e.g. `{"age": 12}`
    pub details: Option<Map<String, Value>>,
}

impl<R: Record> Serialize for LogEntry<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.serialize_entry("action", &self.action)?;
        map.serialize_entry(R::SNAPSHOT_FIELD, &self.snapshot)?;
        map.serialize_entry("details", &self.details)?;
        map.end()
    }
}

impl<'de, R: Record> Deserialize<'de> for LogEntry<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = Map::deserialize(deserializer)?;

        let timestamp = match raw.remove("timestamp") {
            Some(Value::String(s)) => s,
            _ => return Err(D::Error::missing_field("timestamp")),
        };

        let action = raw
            .remove("action")
            .ok_or_else(|| D::Error::missing_field("action"))
            .and_then(|v| serde_json::from_value(v).map_err(D::Error::custom))?;

        let snapshot = match raw.remove(R::SNAPSHOT_FIELD) {
            None | Some(Value::Null) => None,
            Some(v) => Some(serde_json::from_value(v).map_err(D::Error::custom)?),
        };

        let details = match raw.remove("details") {
            None | Some(Value::Null) => None,
            Some(Value::Object(m)) => Some(m),
            Some(_) => return Err(D::Error::custom("details must be an object")),
        };

        Ok(Self {
            timestamp,
            action,
            snapshot,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Student, Teacher};

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&LogAction::EditPassword).unwrap();
        assert_eq!(json, "\"edit_password\"");
        assert_eq!(LogAction::EditPassword.to_string(), "edit_password");
    }

    #[test]
    fn test_student_entry_uses_student_field() {
        let entry = LogEntry::<Student> {
            timestamp: "2024-01-01 12:00:00".to_string(),
            action: LogAction::Add,
            snapshot: Some(Student::new("Alice", 10, "5A", "101", None)),
            details: None,
        };

        let value: Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], "add");
        assert_eq!(value["student"]["roll_number"], "101");
        assert_eq!(value["details"], Value::Null);

        let back: LogEntry<Student> = serde_json::from_value(value).unwrap();
        assert_eq!(back.snapshot.unwrap().name, "Alice");
    }

    #[test]
    fn test_teacher_entry_uses_teacher_field() {
        let entry = LogEntry::<Teacher> {
            timestamp: "2024-01-01 12:00:00".to_string(),
            action: LogAction::EditPassword,
            snapshot: Some(Teacher::new("msmith", "secret")),
            details: None,
        };

        let value: Value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["teacher"]["username"], "msmith");
        assert!(value.get("student").is_none());
    }

    #[test]
    fn test_entry_without_snapshot_round_trips() {
        let raw = r#"{"timestamp":"2024-01-01 12:00:00","action":"view","student":null,"details":null}"#;
        let entry: LogEntry<Student> = serde_json::from_str(raw).unwrap();
        assert!(entry.snapshot.is_none());
        assert!(entry.details.is_none());
    }
}
