//! Student routes: list/filter, add, edit, remove, view

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::pages::{escape, page, redirect_err, redirect_with, teacher_options, Flash};
use super::{internal, AppState};
use crate::types::{Student, StudentChanges, Teacher};

/// Query parameters for the student list
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    #[serde(default)]
    pub teacher_username: Option<String>,
    #[serde(flatten)]
    pub flash: Flash,
}

/// Form fields for add/edit; age stays a string so digit validation
/// matches the CLI's
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default, rename = "class")]
    pub class_label: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub teacher_username: String,
}

/// GET / - student list with optional teacher filter
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexParams>,
) -> Response {
    let selected = params
        .teacher_username
        .as_deref()
        .filter(|s| !s.is_empty());
    let students = state.students.lock().list_by_teacher(selected);
    let teachers = state.teachers.lock().list();

    let mut content = String::from("<h1>Student List</h1>\n");
    content.push_str(&format!(
        r#"<form method="get">
<label>Filter by Teacher:
<select name="teacher_username">{}</select>
</label>
<input type="submit" value="Filter">
</form>
"#,
        teacher_options(&teachers, selected, "All")
    ));

    if students.is_empty() {
        content.push_str("<p>No students found.</p>");
    } else {
        content.push_str(
            "<table>\n<tr><th>Roll No.</th><th>Name</th><th>Age</th><th>Class</th><th>Teacher</th><th>Actions</th></tr>\n",
        );
        for student in &students {
            content.push_str(&format!(
                r#"<tr><td>{roll}</td><td>{name}</td><td>{age}</td><td>{class}</td><td>{teacher}</td>
<td class="actions"><a href="/view/{roll_enc}">View</a> <a href="/edit/{roll_enc}">Edit</a> <a href="/remove/{roll_enc}" onclick="return confirm('Remove this student?');">Remove</a></td></tr>
"#,
                roll = escape(&student.roll_number),
                name = escape(&student.name),
                age = student.age,
                class = escape(&student.class_label),
                teacher = escape(student.teacher_username.as_deref().unwrap_or("")),
                roll_enc = urlencoding::encode(&student.roll_number),
            ));
        }
        content.push_str("</table>\n");
    }

    page(&params.flash, &content).into_response()
}

fn student_form_page(
    flash: &Flash,
    student: Option<&Student>,
    teachers: &[Teacher],
    edit: bool,
) -> Response {
    let title = if edit { "Edit" } else { "Add" };
    let readonly = if edit { " readonly" } else { "" };
    let content = format!(
        r#"<h1>{title} Student</h1>
<form method="post">
<label>Name:<br><input type="text" name="name" value="{name}" required></label><br><br>
<label>Age:<br><input type="number" name="age" value="{age}" required></label><br><br>
<label>Class:<br><input type="text" name="class" value="{class}" required></label><br><br>
<label>Roll Number:<br><input type="text" name="roll_number" value="{roll}"{readonly} required></label><br><br>
<label>Class Teacher:<br><select name="teacher_username">{options}</select></label><br><br>
<input type="submit" value="{title} Student">
<a href="/"><button type="button">Cancel</button></a>
</form>"#,
        title = title,
        name = student.map(|s| escape(&s.name)).unwrap_or_default(),
        age = student.map(|s| s.age.to_string()).unwrap_or_default(),
        class = student.map(|s| escape(&s.class_label)).unwrap_or_default(),
        roll = student.map(|s| escape(&s.roll_number)).unwrap_or_default(),
        readonly = readonly,
        options = teacher_options(
            teachers,
            student.and_then(|s| s.teacher_username.as_deref()),
            "None"
        ),
    );
    page(flash, &content).into_response()
}

/// GET /add
pub async fn add_form(State(state): State<Arc<AppState>>, Query(flash): Query<Flash>) -> Response {
    let teachers = state.teachers.lock().list();
    student_form_page(&flash, None, &teachers, false)
}

/// POST /add
pub async fn add_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StudentForm>,
) -> Response {
    let teachers = state.teachers.lock().list();
    let name = form.name.trim();
    let class_label = form.class_label.trim();
    let roll_number = form.roll_number.trim();

    let complete = !name.is_empty() && !class_label.is_empty() && !roll_number.is_empty();
    let age = match form.age.trim().parse::<u32>() {
        Ok(age) if complete => age,
        _ => {
            let flash = Flash::error("All fields are required and age must be a number.");
            return student_form_page(&flash, None, &teachers, false);
        }
    };

    let teacher_username = Some(form.teacher_username.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let student = Student::new(name, age, class_label, roll_number, teacher_username);

    match state.students.lock().add(student) {
        Ok(outcome) if outcome.ok => redirect_with("/", &outcome).into_response(),
        Ok(outcome) => student_form_page(&Flash::error(outcome.message), None, &teachers, false),
        Err(e) => internal(e),
    }
}

/// GET /edit/:roll_number
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(roll_number): Path<String>,
    Query(flash): Query<Flash>,
) -> Response {
    let roll_number = decode(&roll_number);
    let Some(student) = state.students.lock().get(&roll_number).cloned() else {
        return redirect_err("/", "Student not found.").into_response();
    };
    let teachers = state.teachers.lock().list();
    student_form_page(&flash, Some(&student), &teachers, true)
}

/// POST /edit/:roll_number
pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(roll_number): Path<String>,
    Form(form): Form<StudentForm>,
) -> Response {
    let roll_number = decode(&roll_number);
    let Some(student) = state.students.lock().get(&roll_number).cloned() else {
        return redirect_err("/", "Student not found.").into_response();
    };
    let teachers = state.teachers.lock().list();

    let name = form.name.trim();
    let class_label = form.class_label.trim();

    let complete = !name.is_empty() && !class_label.is_empty();
    let age = match form.age.trim().parse::<u32>() {
        Ok(age) if complete => age,
        _ => {
            let flash = Flash::error("All fields are required and age must be a number.");
            return student_form_page(&flash, Some(&student), &teachers, true);
        }
    };

    let changes = StudentChanges {
        name: Some(name.to_string()),
        age: Some(age),
        class_label: Some(class_label.to_string()),
        teacher_username: Some(form.teacher_username.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    match state.students.lock().edit(&roll_number, changes) {
        Ok(outcome) if outcome.ok => redirect_with("/", &outcome).into_response(),
        Ok(outcome) => {
            student_form_page(&Flash::error(outcome.message), Some(&student), &teachers, true)
        }
        Err(e) => internal(e),
    }
}

/// GET /remove/:roll_number
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(roll_number): Path<String>,
) -> Response {
    let roll_number = decode(&roll_number);
    match state.students.lock().remove(&roll_number) {
        Ok(outcome) => redirect_with("/", &outcome).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /view/:roll_number - detail page; deliberately not audited,
/// unlike the CLI detail view
pub async fn view(State(state): State<Arc<AppState>>, Path(roll_number): Path<String>) -> Response {
    let roll_number = decode(&roll_number);
    let student = state.students.lock().get(&roll_number).cloned();

    let content = match student {
        Some(student) => format!(
            r#"<h1>Student Details</h1>
<table>
<tr><th>Name</th><td>{name}</td></tr>
<tr><th>Age</th><td>{age}</td></tr>
<tr><th>Class</th><td>{class}</td></tr>
<tr><th>Roll Number</th><td>{roll}</td></tr>
<tr><th>Teacher</th><td>{teacher}</td></tr>
</table>
<a href="/edit/{roll_enc}">Edit</a>
<a href="/remove/{roll_enc}" onclick="return confirm('Remove this student?');">Remove</a>
<a href="/">Back to List</a>"#,
            name = escape(&student.name),
            age = student.age,
            class = escape(&student.class_label),
            roll = escape(&student.roll_number),
            teacher = escape(student.teacher_username.as_deref().unwrap_or("")),
            roll_enc = urlencoding::encode(&student.roll_number),
        ),
        None => "<h1>Student Details</h1>\n<p>Student not found.</p>".to_string(),
    };

    page(&Flash::default(), &content).into_response()
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
