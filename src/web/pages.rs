//! Shared HTML layout and rendering helpers
//!
//! Pages are inline HTML strings wrapped in a common layout with a nav
//! bar and flash messages. Flash messages travel in `msg`/`err` query
//! parameters across redirects.

use axum::response::{Html, Redirect};
use serde::Deserialize;

use crate::types::{Outcome, Teacher};

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 40px; background: #e6f2ff; }
.container { max-width: 800px; margin: auto; background: #fff; padding: 2em; border-radius: 8px; box-shadow: 0 2px 8px #ccc; }
h1, h2 { color: #333; }
table { width: 100%; border-collapse: collapse; margin-bottom: 1em; }
th, td { border: 1px solid #ccc; padding: 8px; text-align: left; }
th { background: #eee; }
.actions a { margin-right: 8px; }
.msg { color: green; }
.err { color: red; }
form { margin-bottom: 1em; }
input[type=text], input[type=number], input[type=password] { padding: 6px; width: 95%; }
input[type=submit], button, .btn { padding: 8px 18px; border: none; border-radius: 5px; background: #2196f3; color: #fff; font-weight: bold; cursor: pointer; text-decoration: none; display: inline-block; }
.nav { margin-bottom: 1em; }
.nav .btn { margin-right: 16px; }
"#;

/// Flash messages carried in the query string across redirects
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flash {
    pub msg: Option<String>,
    pub err: Option<String>,
}

impl Flash {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: Some(msg.into()),
            err: None,
        }
    }

    pub fn error(err: impl Into<String>) -> Self {
        Self {
            msg: None,
            err: Some(err.into()),
        }
    }
}

/// Escape text for safe embedding in HTML
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap page content in the shared layout with nav and flash messages
pub fn page(flash: &Flash, content: &str) -> Html<String> {
    let mut flashes = String::new();
    if let Some(msg) = &flash.msg {
        flashes.push_str(&format!("<div class=\"msg\">{}</div>\n", escape(msg)));
    }
    if let Some(err) = &flash.err {
        flashes.push_str(&format!("<div class=\"err\">{}</div>\n", escape(err)));
    }

    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Student Info System</title>
<style>{style}</style>
</head>
<body>
<div class="container">
    <div class="nav">
        <a href="/" class="btn">Home</a>
        <a href="/add" class="btn">Add Student</a>
        <a href="/logs" class="btn">Master Log</a>
        <a href="/principal" class="btn">Principal Dashboard</a>
    </div>
    {flashes}
    {content}
</div>
</body>
</html>"#,
        style = STYLE,
        flashes = flashes,
        content = content
    ))
}

/// Redirect to `path`, carrying the outcome's message as a flash
pub fn redirect_with(path: &str, outcome: &Outcome) -> Redirect {
    let key = if outcome.ok { "msg" } else { "err" };
    Redirect::to(&format!(
        "{}?{}={}",
        path,
        key,
        urlencoding::encode(&outcome.message)
    ))
}

/// Redirect to `path` with an error flash
pub fn redirect_err(path: &str, err: &str) -> Redirect {
    Redirect::to(&format!("{}?err={}", path, urlencoding::encode(err)))
}

/// `<option>` list for a teacher dropdown, with an empty "None"/"All" choice
pub fn teacher_options(teachers: &[Teacher], selected: Option<&str>, empty_label: &str) -> String {
    let mut out = format!("<option value=\"\">{}</option>", escape(empty_label));
    for teacher in teachers {
        let marker = if selected == Some(teacher.username.as_str()) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(&teacher.username),
            marker
        ));
    }
    out
}
