//! Time and timestamp utilities

use chrono::Local;

/// Current local time formatted `YYYY-MM-DD HH:MM:SS`
///
/// This is the timestamp format used in log entries and teacher
/// password-change fields, matching the existing data files.
pub fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
