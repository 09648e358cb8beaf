//! Master log route with name / roll-number filters

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::pages::{escape, page, Flash};
use super::AppState;
use crate::audit::LogFilter;

#[derive(Debug, Deserialize)]
pub struct LogParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(flatten)]
    pub flash: Flash,
}

/// GET /logs - master log, optionally filtered by student name
/// (case-insensitive) or roll number; name wins when both are given
pub async fn master_log(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LogParams>,
) -> Response {
    let name = params.name.as_deref().map(str::trim).unwrap_or("");
    let roll = params.roll_number.as_deref().map(str::trim).unwrap_or("");

    let filter = if !name.is_empty() {
        Some(LogFilter::Name(name.to_string()))
    } else if !roll.is_empty() {
        Some(LogFilter::Key(roll.to_string()))
    } else {
        None
    };

    let entries = state.students.lock().log().query(filter.as_ref());

    let mut content = String::from("<h1>Master Log</h1>\n");
    content.push_str(&format!(
        r#"<form method="get">
<label>Filter by Name: <input type="text" name="name" value="{name}"></label>
<label>Filter by Roll Number: <input type="text" name="roll_number" value="{roll}"></label>
<input type="submit" value="Filter">
<a href="/logs"><button type="button">Clear</button></a>
</form>
"#,
        name = escape(name),
        roll = escape(roll),
    ));

    if entries.is_empty() {
        content.push_str("<p>No logs found.</p>");
    } else {
        content.push_str(
            "<table>\n<tr><th>Timestamp</th><th>Action</th><th>Name</th><th>Roll No.</th><th>Details</th></tr>\n",
        );
        for entry in &entries {
            let (name, roll) = entry
                .snapshot
                .as_ref()
                .map(|s| (s.name.as_str(), s.roll_number.as_str()))
                .unwrap_or(("", ""));
            let details = entry
                .details
                .as_ref()
                .filter(|d| !d.is_empty())
                .map(|d| serde_json::to_string(d).unwrap_or_default())
                .unwrap_or_default();
            content.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&entry.timestamp),
                entry.action,
                escape(name),
                escape(roll),
                escape(&details),
            ));
        }
        content.push_str("</table>");
    }

    page(&params.flash, &content).into_response()
}
