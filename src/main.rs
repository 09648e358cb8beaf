//! Student Info System - Binary Entry Point
//!
//! `student-info` runs the CLI menu; `student-info serve [addr]` runs
//! the web UI. Data files live in the current directory unless
//! `STUDENT_INFO_DIR` points elsewhere.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use student_info::cli::Menu;
use student_info::web::{self, AppState};
use student_info::{StoreResult, StudentStore, TeacherStore};

fn main() -> StoreResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("serve") => {
            let addr = args
                .get(1)
                .cloned()
                .unwrap_or_else(|| "127.0.0.1:5000".to_string());
            run_web(&addr)
        }
        Some("--help") | Some("-h") => {
            println!("Usage: student-info [serve [addr]]");
            println!();
            println!("  (no args)     interactive CLI menu");
            println!("  serve [addr]  web UI, default 127.0.0.1:5000");
            Ok(())
        }
        _ => run_cli(),
    }
}

fn data_dir() -> PathBuf {
    match env::var("STUDENT_INFO_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

fn run_cli() -> StoreResult<()> {
    let dir = data_dir();
    let store = StudentStore::open(dir.join("students.json"), dir.join("master_log.json"));
    Menu::new(store).run()
}

fn run_web(addr: &str) -> StoreResult<()> {
    let dir = data_dir();
    let students = StudentStore::open(dir.join("students.json"), dir.join("master_log.json"));
    let teachers = TeacherStore::open(dir.join("teachers.json"), dir.join("teacher_log.json"));
    let state = Arc::new(AppState::new(students, teachers));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(addr, state))
}
