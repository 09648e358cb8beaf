//! Student-specific store operations

use serde_json::{json, Map};

use crate::types::{LogAction, Outcome, Record, Student, StudentChanges, StoreResult};

use super::EntityStore;

impl EntityStore<Student> {
    /// Apply a partial update to the student with the given roll number
    ///
    /// Only the supplied fields change; the roll number never does. The
    /// logged `edit` event's details name exactly the fields that were
    /// applied. An edit with no supplied fields still persists and logs
    /// an entry with empty details, matching the historical log shape.
    pub fn edit(&mut self, roll_number: &str, changes: StudentChanges) -> StoreResult<Outcome> {
        let Some(record) = self.records_mut().get_mut(roll_number) else {
            return Ok(Outcome::failure(format!(
                "{} not found!",
                Student::describe(roll_number)
            )));
        };

        let mut details = Map::new();
        if let Some(name) = changes.name {
            details.insert("name".to_string(), json!(name));
            record.name = name;
        }
        if let Some(age) = changes.age {
            details.insert("age".to_string(), json!(age));
            record.age = age;
        }
        if let Some(class_label) = changes.class_label {
            details.insert("class".to_string(), json!(class_label));
            record.class_label = class_label;
        }
        if let Some(teacher_username) = changes.teacher_username {
            details.insert("teacher_username".to_string(), json!(teacher_username));
            record.teacher_username = Some(teacher_username);
        }

        let snapshot = record.clone();
        self.save()?;
        self.log()
            .append(LogAction::Edit, Some(&snapshot), Some(details))?;
        Ok(Outcome::success("Student updated successfully!"))
    }

    /// Students in roll-number order, optionally only those assigned to
    /// the given teacher
    pub fn list_by_teacher(&self, teacher_username: Option<&str>) -> Vec<Student> {
        match teacher_username {
            Some(username) => self
                .list()
                .into_iter()
                .filter(|s| s.teacher_username.as_deref() == Some(username))
                .collect(),
            None => self.list(),
        }
    }
}
