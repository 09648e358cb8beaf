//! Integration tests for the entity stores and their action logs

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use student_info::{
    LogAction, LogFilter, Student, StudentChanges, StudentStore, Teacher, TeacherChanges,
    TeacherStore,
};

fn student_store(dir: &TempDir) -> StudentStore {
    StudentStore::open(
        dir.path().join("students.json"),
        dir.path().join("master_log.json"),
    )
}

fn teacher_store(dir: &TempDir) -> TeacherStore {
    TeacherStore::open(
        dir.path().join("teachers.json"),
        dir.path().join("teacher_log.json"),
    )
}

fn alice() -> Student {
    Student::new("Alice", 10, "5A", "101", None)
}

#[test]
fn test_add_then_get_returns_equal_record() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    let outcome = store.add(alice()).unwrap();
    assert!(outcome.ok);
    assert_eq!(outcome.message, "Student 'Alice' added successfully!");

    assert_eq!(store.get("101"), Some(&alice()));
}

#[test]
fn test_duplicate_add_changes_nothing_and_logs_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    store.add(alice()).unwrap();
    let table_before = fs::read_to_string(dir.path().join("students.json")).unwrap();
    let log_len_before = store.log().entries().len();

    let outcome = store
        .add(Student::new("Bob", 11, "5A", "101", None))
        .unwrap();
    assert!(!outcome.ok);
    assert!(outcome.message.contains("already exists"));

    // In-memory table keeps the original record
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("101").unwrap().name, "Alice");

    // Backing file and log are untouched
    let table_after = fs::read_to_string(dir.path().join("students.json")).unwrap();
    assert_eq!(table_before, table_after);
    assert_eq!(store.log().entries().len(), log_len_before);
}

#[test]
fn test_remove_absent_key_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);
    store.add(alice()).unwrap();
    let log_len_before = store.log().entries().len();

    let outcome = store.remove("999").unwrap();
    assert!(!outcome.ok);
    assert!(outcome.message.contains("not found"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.log().entries().len(), log_len_before);
}

#[test]
fn test_mutations_append_matching_log_entries() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    store.add(alice()).unwrap();
    let entries = store.log().entries();
    let last = entries.last().unwrap();
    assert_eq!(last.action, LogAction::Add);
    assert_eq!(last.snapshot.as_ref().unwrap(), &alice());

    store
        .edit(
            "101",
            StudentChanges {
                age: Some(12),
                ..Default::default()
            },
        )
        .unwrap();
    let entries = store.log().entries();
    let last = entries.last().unwrap();
    assert_eq!(last.action, LogAction::Edit);
    // Snapshot reflects the post-edit state
    assert_eq!(last.snapshot.as_ref().unwrap().age, 12);

    store.remove("101").unwrap();
    let entries = store.log().entries();
    let last = entries.last().unwrap();
    assert_eq!(last.action, LogAction::Remove);
    // Pre-deletion snapshot
    assert_eq!(last.snapshot.as_ref().unwrap().roll_number, "101");
}

#[test]
fn test_partial_edit_leaves_other_fields() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);
    store.add(alice()).unwrap();

    let outcome = store
        .edit(
            "101",
            StudentChanges {
                age: Some(12),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(outcome.ok);

    let student = store.get("101").unwrap();
    assert_eq!(student.age, 12);
    assert_eq!(student.name, "Alice");
    assert_eq!(student.class_label, "5A");
    assert_eq!(student.roll_number, "101");

    // Details describe exactly the changed field
    let entries = store.log().entries();
    let details = entries.last().unwrap().details.as_ref().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details.get("age").unwrap(), &json!(12));
}

#[test]
fn test_edit_absent_key_is_not_found() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    let outcome = store.edit("101", StudentChanges::default()).unwrap();
    assert!(!outcome.ok);
    assert!(store.log().entries().is_empty());
}

#[test]
fn test_round_trip_save_load() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = student_store(&dir);
        store.add(alice()).unwrap();
        store
            .add(Student::new(
                "Bob",
                11,
                "5B",
                "102",
                Some("msmith".to_string()),
            ))
            .unwrap();
    }

    let reloaded = student_store(&dir);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.get("101"), Some(&alice()));
    assert_eq!(
        reloaded.get("102").unwrap().teacher_username.as_deref(),
        Some("msmith")
    );
}

#[test]
fn test_corrupt_table_file_loads_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("students.json"), "{ not valid json").unwrap();

    let store = student_store(&dir);
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_roll_scenario() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    assert!(store.add(alice()).unwrap().ok);
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].roll_number, "101");

    let outcome = store
        .add(Student::new("Bob", 11, "5A", "101", None))
        .unwrap();
    assert!(!outcome.ok);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn test_list_is_key_ordered_and_filterable_by_teacher() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    store
        .add(Student::new("Cara", 9, "4A", "203", Some("amy".to_string())))
        .unwrap();
    store.add(alice()).unwrap();
    store
        .add(Student::new("Bob", 11, "5B", "102", Some("amy".to_string())))
        .unwrap();

    let rolls: Vec<String> = store.list().iter().map(|s| s.roll_number.clone()).collect();
    assert_eq!(rolls, vec!["101", "102", "203"]);

    let amy_students = store.list_by_teacher(Some("amy"));
    assert_eq!(amy_students.len(), 2);
    assert!(amy_students.iter().all(|s| s.teacher_username.as_deref() == Some("amy")));

    assert_eq!(store.list_by_teacher(None).len(), 3);
}

#[test]
fn test_log_filter_by_name_ignores_case() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);

    store.add(alice()).unwrap();
    store
        .add(Student::new("Bob", 11, "5A", "102", None))
        .unwrap();

    let hits = store.log().query(Some(&LogFilter::Name("alice".to_string())));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].snapshot.as_ref().unwrap().name, "Alice");
}

#[test]
fn test_teacher_password_change_refreshes_timestamp_and_logs() {
    let dir = TempDir::new().unwrap();
    let mut store = teacher_store(&dir);

    store.add(Teacher::new("msmith", "old-secret")).unwrap();

    let outcome = store
        .edit(
            "msmith",
            TeacherChanges {
                password: Some("new-secret".to_string()),
            },
        )
        .unwrap();
    assert!(outcome.ok);

    let teacher = store.get("msmith").unwrap();
    assert_eq!(teacher.password, "new-secret");

    let entries = store.log().entries();
    let last = entries.last().unwrap();
    assert_eq!(last.action, LogAction::EditPassword);
    let details = last.details.as_ref().unwrap();
    assert_eq!(details.get("password").unwrap(), &json!("new-secret"));
    assert!(details.contains_key("last_password_change"));
}

#[test]
fn test_teacher_same_password_is_a_silent_no_op() {
    let dir = TempDir::new().unwrap();
    let mut store = teacher_store(&dir);

    store.add(Teacher::new("msmith", "secret")).unwrap();
    let stamp_before = store.get("msmith").unwrap().last_password_change.clone();
    let log_len_before = store.log().entries().len();

    let outcome = store
        .edit(
            "msmith",
            TeacherChanges {
                password: Some("secret".to_string()),
            },
        )
        .unwrap();
    assert!(outcome.ok);

    let teacher = store.get("msmith").unwrap();
    assert_eq!(teacher.last_password_change, stamp_before);
    assert_eq!(store.log().entries().len(), log_len_before);
}

#[test]
fn test_teacher_log_uses_teacher_snapshot_field() {
    let dir = TempDir::new().unwrap();
    let mut store = teacher_store(&dir);
    store.add(Teacher::new("msmith", "secret")).unwrap();

    let raw = fs::read_to_string(dir.path().join("teacher_log.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &parsed.as_array().unwrap()[0];
    assert_eq!(entry["action"], "add");
    assert_eq!(entry["teacher"]["username"], "msmith");
    assert!(entry.get("student").is_none());
}

#[test]
fn test_student_table_file_shape() {
    let dir = TempDir::new().unwrap();
    let mut store = student_store(&dir);
    store.add(alice()).unwrap();

    let raw = fs::read_to_string(dir.path().join("students.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &parsed["101"];
    assert_eq!(record["name"], "Alice");
    assert_eq!(record["age"], 10);
    assert_eq!(record["class"], "5A");
    assert_eq!(record["roll_number"], "101");
    assert_eq!(record["teacher_username"], serde_json::Value::Null);
}
