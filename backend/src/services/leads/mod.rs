//! # Lead Service Module
//!
//! The sales pipeline under `/api/leads`: prospective students, their
//! conversion into enrolled students, and bulk import from CSV.
//!
//! ## Sub-modules:
//! - `list` / `get`: Lead records joined with the course they are interested in.
//! - `create` / `update` / `delete`: Writes.
//! - `convert`: Creates a student from a lead and marks the lead converted, atomically.
//! - `import`: Multipart CSV upload validated and inserted by a background job.

mod convert;
pub mod create;
mod delete;
mod get;
mod import;
mod list;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/leads";

/// Configures and returns the Actix `Scope` for all lead routes.
///
/// *   **`GET /`**: `list::process`, accepts a `LeadQuery`.
/// *   **`POST /`**: `create::process`, `LeadInput` body.
/// *   **`POST /import`**: `import::process`, multipart with a `file` part; returns a `JobCreated`.
/// *   **`GET /import/status/{job_id}`**: current `JobStatus` of an import.
/// *   **`GET|PUT|DELETE /{lead_id}`**: single lead.
/// *   **`POST /{lead_id}/convert`**: `ConvertLeadRequest` body, answers with the new student.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/import", post().to(import::process))
        .route("/import/status/{job_id}", get().to(import::status))
        .route("/{lead_id}", get().to(get::process))
        .route("/{lead_id}", put().to(update::process))
        .route("/{lead_id}", delete().to(delete::process))
        .route("/{lead_id}/convert", post().to(convert::process))
}
