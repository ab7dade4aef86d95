//! # Course Service Module
//!
//! CRUD over the course catalogue under `/api/courses`.
//!
//! ## Sub-modules:
//! - `list`: Lists courses with in-memory search, filters and ordering.
//! - `get`: Fetches a single course.
//! - `create`: Validates and inserts a course.
//! - `update`: Replaces the editable fields of a course.
//! - `delete`: Removes a course nobody is enrolled in.

pub mod create;
mod delete;
mod get;
pub mod list;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

/// The base path for all course-related API endpoints.
const API_PATH: &str = "/api/courses";

/// Configures and returns the Actix `Scope` for all course routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`, accepts a `CourseQuery` in the query string.
/// *   **`POST /`**: `create::process`, `CourseInput` body, answers `201 Created`.
/// *   **`GET /{course_id}`**: `get::process`.
/// *   **`PUT /{course_id}`**: `update::process`, `CourseInput` body.
/// *   **`DELETE /{course_id}`**: `delete::process`, `409 Conflict` while students
///     are enrolled.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{course_id}", get().to(get::process))
        .route("/{course_id}", put().to(update::process))
        .route("/{course_id}", delete().to(delete::process))
}
