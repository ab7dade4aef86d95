//! # Student Service Module
//!
//! Enrollment records under `/api/students`.
//!
//! ## Sub-modules:
//! - `list`: Student records joined with their course, searched and ordered in memory.
//! - `get`: A single student record.
//! - `validate`: The checks every write goes through, including the duplicate
//!   student id scan.
//! - `create` / `update` / `delete`: Writes.
//! - `export`: All student records as CSV.

pub mod create;
mod delete;
mod export;
mod get;
pub mod list;
mod update;
mod validate;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/students";

/// Configures and returns the Actix `Scope` for all student routes.
///
/// *   **`GET /`**: `list::process`, accepts a `StudentQuery`.
/// *   **`POST /`**: `create::process`, `StudentInput` body, `201 Created`.
/// *   **`GET /export`**: `export::process`, `text/csv`.
/// *   **`GET /{student_id}`** / **`PUT /{student_id}`** / **`DELETE /{student_id}`**:
///     addressed by the record id, not the operator-assigned student id.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/export", get().to(export::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(delete::process))
}
