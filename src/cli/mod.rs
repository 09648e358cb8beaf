//! Menu-driven terminal front end
//!
//! Mirrors the classic numbered menu: add, remove, edit, display,
//! master-log views and filters. All business rules live in the store;
//! this module only prompts, validates input presence/type and renders
//! tables. The detail view is the one place that appends a `view` log
//! entry, a presentation choice the store deliberately leaves to its
//! caller.

use std::io::{self, BufRead, BufReader, Write};

use crate::audit::LogFilter;
use crate::store::StudentStore;
use crate::types::{LogAction, LogEntry, Student, StudentChanges, StoreResult};

/// Interactive menu over a student store, reading choices from stdin
pub struct Menu {
    store: StudentStore,
    reader: BufReader<io::Stdin>,
}

impl Menu {
    pub fn new(store: StudentStore) -> Self {
        Self {
            store,
            reader: BufReader::new(io::stdin()),
        }
    }

    /// Run the menu loop until the user exits or stdin closes
    pub fn run(&mut self) -> StoreResult<()> {
        loop {
            print_menu();
            let Some(choice) = self.prompt("\nEnter your choice (1-9): ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.remove_student()?,
                "3" => self.edit_student()?,
                "4" => self.display_all(),
                "5" => self.display_one()?,
                "6" => self.view_logs(None),
                "7" => self.filter_logs_by_name()?,
                "8" => self.filter_logs_by_roll()?,
                "9" => {
                    println!("\nSaving data before exit...");
                    self.store.save()?;
                    println!("Thank you for using Student Info System!");
                    break;
                }
                _ => println!("Invalid choice! Please enter a number between 1 and 9."),
            }
            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` once stdin closes
    fn prompt(&mut self, message: &str) -> StoreResult<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_student(&mut self) -> StoreResult<()> {
        println!("\n--- ADD NEW STUDENT ---");
        let Some(student) = self.collect_student()? else {
            return Ok(());
        };
        let outcome = self.store.add(student)?;
        println!("{}", outcome.message);
        Ok(())
    }

    /// Collect and validate the fields for a new student
    ///
    /// Rejects blank name/class/roll and non-numeric age with an inline
    /// message; the caller falls back to the menu rather than re-prompting
    /// immediately.
    fn collect_student(&mut self) -> StoreResult<Option<Student>> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(None);
        };
        if name.is_empty() {
            println!("Name is required!");
            return Ok(None);
        }
        let Some(age) = self.prompt("Enter age: ")? else {
            return Ok(None);
        };
        let Ok(age) = age.parse::<u32>() else {
            println!("Age must be a number!");
            return Ok(None);
        };
        let Some(class_label) = self.prompt("Enter class: ")? else {
            return Ok(None);
        };
        if class_label.is_empty() {
            println!("Class is required!");
            return Ok(None);
        }
        let Some(roll_number) = self.prompt("Enter roll number: ")? else {
            return Ok(None);
        };
        if roll_number.is_empty() {
            println!("Roll number is required!");
            return Ok(None);
        }
        Ok(Some(Student::new(name, age, class_label, roll_number, None)))
    }

    fn remove_student(&mut self) -> StoreResult<()> {
        println!("\n--- REMOVE STUDENT ---");
        self.display_all();
        if let Some(roll) = self.prompt("Enter roll number to remove: ")? {
            if !roll.is_empty() {
                let outcome = self.store.remove(&roll)?;
                println!("{}", outcome.message);
            }
        }
        Ok(())
    }

    fn edit_student(&mut self) -> StoreResult<()> {
        println!("\n--- EDIT STUDENT ---");
        self.display_all();
        let Some(roll) = self.prompt("Enter roll number to edit: ")? else {
            return Ok(());
        };
        if roll.is_empty() {
            return Ok(());
        }
        let Some(current) = self.store.get(&roll).cloned() else {
            println!("Student with roll number {} not found!", roll);
            return Ok(());
        };

        println!(
            "\nEditing student: {} (Roll: {})",
            current.name, current.roll_number
        );
        println!("Leave blank to keep current value.");

        let mut changes = StudentChanges::default();
        if let Some(name) = self.prompt(&format!("Name ({}): ", current.name))? {
            if !name.is_empty() {
                changes.name = Some(name);
            }
        }
        if let Some(age) = self.prompt(&format!("Age ({}): ", current.age))? {
            if !age.is_empty() {
                match age.parse::<u32>() {
                    Ok(age) => changes.age = Some(age),
                    Err(_) => println!("Invalid age. Keeping previous value."),
                }
            }
        }
        if let Some(class_label) = self.prompt(&format!("Class ({}): ", current.class_label))? {
            if !class_label.is_empty() {
                changes.class_label = Some(class_label);
            }
        }

        let outcome = self.store.edit(&roll, changes)?;
        println!("{}", outcome.message);
        Ok(())
    }

    fn display_all(&self) {
        if self.store.is_empty() {
            println!("No students found.");
            return;
        }
        println!("\n{}", "=".repeat(60));
        println!("STUDENT LIST - {} students", self.store.len());
        println!("{}", "=".repeat(60));
        println!(
            "{:<10} | {:<20} | {:<5} | {:<10}",
            "Roll No.", "Name", "Age", "Class"
        );
        println!("{}", "-".repeat(60));
        for student in self.store.list() {
            println!(
                "{:<10} | {:<20} | {:<5} | {:<10}",
                student.roll_number, student.name, student.age, student.class_label
            );
        }
    }

    fn display_one(&mut self) -> StoreResult<()> {
        let Some(roll) = self.prompt("Enter roll number to display: ")? else {
            return Ok(());
        };
        if roll.is_empty() {
            return Ok(());
        }
        match self.store.get(&roll).cloned() {
            Some(student) => {
                println!("\n{}", "=".repeat(40));
                println!("Name: {}", student.name);
                println!("Age: {}", student.age);
                println!("Class: {}", student.class_label);
                println!("Roll Number: {}", student.roll_number);
                println!("{}", "=".repeat(40));
                // The detail view is audited; plain lookups are not.
                self.store.log().append(LogAction::View, Some(&student), None)?;
            }
            None => println!("Student with roll number {} not found!", roll),
        }
        Ok(())
    }

    fn filter_logs_by_name(&mut self) -> StoreResult<()> {
        if let Some(name) = self.prompt("Enter student name to filter logs: ")? {
            if !name.is_empty() {
                self.view_logs(Some(LogFilter::Name(name)));
            }
        }
        Ok(())
    }

    fn filter_logs_by_roll(&mut self) -> StoreResult<()> {
        if let Some(roll) = self.prompt("Enter roll number to filter logs: ")? {
            if !roll.is_empty() {
                self.view_logs(Some(LogFilter::Key(roll)));
            }
        }
        Ok(())
    }

    fn view_logs(&self, filter: Option<LogFilter>) {
        let entries = self.store.log().query(filter.as_ref());
        if entries.is_empty() {
            if filter.is_some() {
                println!("No logs found for the given filter.");
            } else {
                println!("No logs found.");
            }
            return;
        }
        println!("\n{}", "=".repeat(60));
        println!("MASTER LOGS ({} entries)", entries.len());
        println!("{}", "=".repeat(60));
        for entry in &entries {
            println!("{}", render_entry(entry));
        }
    }
}

fn render_entry(entry: &LogEntry<Student>) -> String {
    let snapshot = entry
        .snapshot
        .as_ref()
        .and_then(|s| serde_json::to_string(s).ok())
        .unwrap_or_default();
    let details = entry
        .details
        .as_ref()
        .filter(|d| !d.is_empty())
        .map(|d| serde_json::to_string(d).unwrap_or_default())
        .unwrap_or_default();
    format!(
        "[{}] {} - {} {}",
        entry.timestamp,
        entry.action.to_string().to_uppercase(),
        snapshot,
        details
    )
}

fn print_menu() {
    println!("\n{}", "=".repeat(50));
    println!("         STUDENT INFO SYSTEM");
    println!("{}", "=".repeat(50));
    println!("1. Add Student");
    println!("2. Remove Student");
    println!("3. Edit Student");
    println!("4. Display All Students");
    println!("5. Display Specific Student");
    println!("6. View Master Log");
    println!("7. Search Log by Student Name");
    println!("8. Search Log by Roll Number");
    println!("9. Exit");
    println!("{}", "=".repeat(50));
}
