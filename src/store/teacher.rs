//! Teacher-specific store operations

use serde_json::{json, Map};

use crate::types::{LogAction, Outcome, Record, StoreResult, Teacher, TeacherChanges};
use crate::utils::now_stamp;

use super::EntityStore;

impl EntityStore<Teacher> {
    /// Apply a partial update to the teacher with the given username
    ///
    /// A password edit refreshes `last_password_change` and logs an
    /// `edit_password` event, but only when the new password differs
    /// from the stored one. Resubmitting the same password saves the
    /// table (unchanged) and logs nothing.
    pub fn edit(&mut self, username: &str, changes: TeacherChanges) -> StoreResult<Outcome> {
        let Some(record) = self.records_mut().get_mut(username) else {
            return Ok(Outcome::failure(format!(
                "{} not found!",
                Teacher::describe(username)
            )));
        };

        let mut details = Map::new();
        if let Some(password) = changes.password {
            if password != record.password {
                record.password = password.clone();
                record.last_password_change = now_stamp();
                details.insert("password".to_string(), json!(password));
                details.insert(
                    "last_password_change".to_string(),
                    json!(record.last_password_change),
                );
            }
        }

        let snapshot = record.clone();
        self.save()?;
        if !details.is_empty() {
            self.log()
                .append(LogAction::EditPassword, Some(&snapshot), Some(details))?;
        }
        Ok(Outcome::success("Teacher updated successfully!"))
    }
}
