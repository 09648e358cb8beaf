//! Principal area: teacher table, add, edit password, remove

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::pages::{escape, page, redirect_err, redirect_with, Flash};
use super::{internal, AppState};
use crate::types::{Teacher, TeacherChanges};

#[derive(Debug, Deserialize)]
pub struct TeacherForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /principal - teacher table
pub async fn dashboard(State(state): State<Arc<AppState>>, Query(flash): Query<Flash>) -> Response {
    let teachers = state.teachers.lock().list();

    let mut content = String::from(
        "<h1>Principal Dashboard - Teachers</h1>\n<a href=\"/principal/add\"><button>Add Teacher</button></a>\n",
    );
    content.push_str(
        "<table>\n<tr><th>Username</th><th>Password</th><th>Last Password Change</th><th>Actions</th></tr>\n",
    );
    for teacher in &teachers {
        content.push_str(&format!(
            r#"<tr><td>{user}</td><td>{password}</td><td>{changed}</td>
<td class="actions"><a href="/principal/edit/{user_enc}">Edit</a> <a href="/principal/remove/{user_enc}" onclick="return confirm('Remove this teacher?');">Remove</a></td></tr>
"#,
            user = escape(&teacher.username),
            password = escape(&teacher.password),
            changed = escape(&teacher.last_password_change),
            user_enc = urlencoding::encode(&teacher.username),
        ));
    }
    content.push_str("</table>");

    page(&flash, &content).into_response()
}

fn add_teacher_page(flash: &Flash) -> Response {
    let content = r#"<h1>Add Teacher</h1>
<form method="post">
<label>Username:<br><input type="text" name="username" required></label><br><br>
<label>Password:<br><input type="password" name="password" required></label><br><br>
<input type="submit" value="Add Teacher">
<a href="/principal"><button type="button">Cancel</button></a>
</form>"#;
    page(flash, content).into_response()
}

fn edit_teacher_page(flash: &Flash, teacher: &Teacher) -> Response {
    let content = format!(
        r#"<h1>Edit Teacher - {user}</h1>
<form method="post">
<label>New Password:<br><input type="password" name="password" value="{password}" required></label><br><br>
<input type="submit" value="Update Password">
<a href="/principal"><button type="button">Cancel</button></a>
</form>
<p>Last Password Change: {changed}</p>"#,
        user = escape(&teacher.username),
        password = escape(&teacher.password),
        changed = escape(&teacher.last_password_change),
    );
    page(flash, &content).into_response()
}

/// GET /principal/add
pub async fn add_form(Query(flash): Query<Flash>) -> Response {
    add_teacher_page(&flash)
}

/// POST /principal/add
pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TeacherForm>,
) -> Response {
    let username = form.username.trim();
    let password = form.password.trim();
    if username.is_empty() || password.is_empty() {
        return add_teacher_page(&Flash::error("All fields are required."));
    }

    match state.teachers.lock().add(Teacher::new(username, password)) {
        Ok(outcome) if outcome.ok => redirect_with("/principal", &outcome).into_response(),
        Ok(outcome) => add_teacher_page(&Flash::error(outcome.message)),
        Err(e) => internal(e),
    }
}

/// GET /principal/edit/:username
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(flash): Query<Flash>,
) -> Response {
    let username = decode(&username);
    let Some(teacher) = state.teachers.lock().get(&username).cloned() else {
        return redirect_err("/principal", "Teacher not found.").into_response();
    };
    edit_teacher_page(&flash, &teacher)
}

/// POST /principal/edit/:username
pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Form(form): Form<TeacherForm>,
) -> Response {
    let username = decode(&username);
    let Some(teacher) = state.teachers.lock().get(&username).cloned() else {
        return redirect_err("/principal", "Teacher not found.").into_response();
    };

    let password = form.password.trim();
    if password.is_empty() {
        return edit_teacher_page(&Flash::error("Password is required."), &teacher);
    }

    let changes = TeacherChanges {
        password: Some(password.to_string()),
    };
    match state.teachers.lock().edit(&username, changes) {
        Ok(outcome) if outcome.ok => redirect_with("/principal", &outcome).into_response(),
        Ok(outcome) => edit_teacher_page(&Flash::error(outcome.message), &teacher),
        Err(e) => internal(e),
    }
}

/// GET /principal/remove/:username
pub async fn remove(State(state): State<Arc<AppState>>, Path(username): Path<String>) -> Response {
    let username = decode(&username);
    match state.teachers.lock().remove(&username) {
        Ok(outcome) => redirect_with("/principal", &outcome).into_response(),
        Err(e) => internal(e),
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
