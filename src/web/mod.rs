//! Web front end built on Axum
//!
//! The stores are constructed once at process start and handed to every
//! request handler through [`AppState`] rather than living as ambient
//! globals. Each store sits behind its own `parking_lot::Mutex`, the
//! single-writer serialization point for concurrent requests; the
//! read-modify-write cycle on the table and log files is otherwise
//! unguarded.

pub mod logs;
pub mod pages;
pub mod students;
pub mod teachers;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::store::{StudentStore, TeacherStore};
use crate::types::{StoreError, StoreResult};

/// Shared application state: one store per entity, each behind a
/// single-writer lock
pub struct AppState {
    pub students: Mutex<StudentStore>,
    pub teachers: Mutex<TeacherStore>,
}

impl AppState {
    pub fn new(students: StudentStore, teachers: TeacherStore) -> Self {
        Self {
            students: Mutex::new(students),
            teachers: Mutex::new(teachers),
        }
    }
}

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Student pages
        .route("/", get(students::index))
        .route("/add", get(students::add_form).post(students::add_submit))
        .route(
            "/edit/:roll_number",
            get(students::edit_form).post(students::edit_submit),
        )
        .route("/remove/:roll_number", get(students::remove))
        .route("/view/:roll_number", get(students::view))
        // Master log
        .route("/logs", get(logs::master_log))
        // Principal area
        .route("/principal", get(teachers::dashboard))
        .route(
            "/principal/add",
            get(teachers::add_form).post(teachers::add_submit),
        )
        .route(
            "/principal/edit/:username",
            get(teachers::edit_form).post(teachers::edit_submit),
        )
        .route("/principal/remove/:username", get(teachers::remove))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Bind and serve until Ctrl+C
pub async fn serve(addr: &str, state: Arc<AppState>) -> StoreResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("[Web] Listening on http://{}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    eprintln!("[Web] Shutting down");
}

/// 500 response for unexpected storage faults
pub(crate) fn internal(e: StoreError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Internal error: {}", e),
    )
        .into_response()
}
